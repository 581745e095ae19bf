use crate::app::service::CourseService;
use crate::config::Settings;
use crate::server;
use anyhow::{Context as _, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "course-api", about = "CRUD HTTP API for courses and students")]
pub struct Cli {
    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the settings file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Maximum number of students per course (overrides the settings file)
    #[arg(long = "max-students")]
    pub max_students: Option<usize>,
}

impl Cli {
    /// Resolve the effective settings: file (or defaults), then flag overrides.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            settings.bind_address = bind;
        }
        if let Some(max) = self.max_students {
            settings.max_students_per_course = max;
        }
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    info!(
        bind = %settings.bind_address,
        max_students_per_course = settings.max_students_per_course,
        "starting course-api"
    );
    let addr = settings.bind_address;
    server::http::serve(CourseService::in_memory(settings), addr).await
}
