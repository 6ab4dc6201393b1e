use crate::{
    common::{config::DEFAULT_CONFIG_PATH, Config, DevMode, Result},
    core::FaceRoster,
    protocol::Response,
};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug, Clone)]
#[command(name = "classface")]
#[command(version, about = "Register and recognize student faces", allow_negative_numbers = true)]
pub struct Cli {
    /// Enable development mode (local data dir, debug logs and images)
    #[arg(long)]
    pub dev: bool,

    /// Configuration file; built-in defaults apply when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// `register` or `recognize`
    pub operation: Option<String>,

    /// Image to process
    pub image_path: Option<PathBuf>,

    /// Student id, required by `register`
    pub student_id: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Recognize,
}

impl FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "register" => Ok(Operation::Register),
            "recognize" => Ok(Operation::Recognize),
            _ => Err(()),
        }
    }
}

/// A validated invocation, ready to run against an opened roster.
enum Job<'a> {
    Register(&'a str),
    Recognize,
}

/// Runs one invocation, opening the roster from the configured location.
pub fn run(cli: &Cli) -> Response {
    execute(cli, || {
        let config = Config::load_or_default(&cli.config)?;
        let dev_mode = DevMode::new(cli.dev)?;
        FaceRoster::new(&config, dev_mode)
    })
}

/// Argument checks happen before `open` is called, so a bad invocation
/// never touches the data directory.
pub fn execute<F>(cli: &Cli, open: F) -> Response
where
    F: FnOnce() -> Result<FaceRoster>,
{
    let (Some(operation), Some(image_path)) = (cli.operation.as_deref(), cli.image_path.as_deref()) else {
        return Response::failure("Insufficient arguments");
    };

    let operation = match operation.parse::<Operation>() {
        Ok(operation) => operation,
        Err(()) => {
            tracing::debug!("Unknown operation {:?}", operation);
            return Response::failure("Invalid operation");
        }
    };
    let job = match (operation, cli.student_id.as_deref()) {
        (Operation::Register, Some(student_id)) => Job::Register(student_id),
        (Operation::Register, None) => return Response::failure("Student ID required for registration"),
        (Operation::Recognize, _) => Job::Recognize,
    };

    let mut roster = match open() {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Initialization failed: {}", e);
            return Response::failure(e);
        }
    };

    match job {
        Job::Register(student_id) => roster.register_student(image_path, student_id).into(),
        Job::Recognize => roster.recognize_faces(image_path).into(),
    }
}
