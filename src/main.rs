//! commentview - Entry Point

use clap::Parser;
use commentview::model::ReactionContent;
use commentview::plan::{self, Interaction};
use commentview::state::{CommentController, ImmediateClient, MutationOutcome};
use commentview::view_state::LayoutWidth;
use commentview::AppError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::info;

/// commentview - print the layout plan of one issue comment
#[derive(Parser, Debug)]
#[command(name = "commentview")]
#[command(version)]
#[command(about = "Project a comment JSON document into its renderable layout plan")]
pub struct Args {
    /// Path to the comment JSON document
    pub file: PathBuf,

    /// Container width in points (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Tap the item at this index before printing (repeatable)
    #[arg(short, long)]
    pub tap: Vec<usize>,

    /// Toggle a reaction (+1, -1, laugh, hooray, confused, heart, rocket, eyes)
    #[arg(short, long)]
    pub react: Option<ReactionContent>,

    /// Remove the reaction given with --react instead of adding it
    #[arg(long, requires = "react")]
    pub remove: bool,

    /// Simulate the reaction mutation failing
    #[arg(long, requires = "react")]
    pub fail: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Interactions in the order they are replayed: taps first, then the reaction.
    pub fn interactions(&self) -> Vec<Interaction> {
        let mut interactions: Vec<Interaction> =
            self.tap.iter().copied().map(Interaction::Tap).collect();
        if let Some(content) = self.react {
            interactions.push(Interaction::React {
                content,
                is_add: !self.remove,
            });
        }
        interactions
    }

    /// Outcome the simulated reaction client reports.
    pub fn outcome(&self) -> MutationOutcome {
        if self.fail {
            MutationOutcome::Failed
        } else {
            MutationOutcome::Succeeded
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = commentview::config::load_config_with_precedence(args.config.clone())?;
        let merged = commentview::config::merge_config(config_file);
        let with_env = commentview::config::apply_env_overrides(merged);
        commentview::config::apply_cli_overrides(with_env, args.width, args.log_file.clone())?
    };

    commentview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let comment = plan::load_comment(&args.file)?;
    let mut controller = CommentController::new(
        comment,
        config.controller_config(),
        Rc::new(ImmediateClient(args.outcome())),
    );
    // apply_cli_overrides rejects zero, and the default is positive
    let width = LayoutWidth::new(config.container_width).map_err(|_| {
        AppError::Config(commentview::config::ConfigError::ZeroWidth)
    })?;
    controller.set_container_width(width);

    let effects = plan::replay(&mut controller, &args.interactions())?;
    info!(effects = ?effects, "interactions replayed");

    print!("{}", plan::render_plan(&mut controller)?);
    controller.release();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let err = Args::try_parse_from(["commentview", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_file_is_required() {
        let err = Args::try_parse_from(["commentview"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["commentview", "comment.json"]);
        assert_eq!(args.file, PathBuf::from("comment.json"));
        assert_eq!(args.width, None);
        assert!(args.tap.is_empty());
        assert_eq!(args.react, None);
        assert!(args.interactions().is_empty());
        assert_eq!(args.outcome(), MutationOutcome::Succeeded);
    }

    #[test]
    fn test_width_rejects_zero() {
        let err = Args::try_parse_from(["commentview", "c.json", "-w", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_react_parses_labels_and_graphql_names() {
        let args = Args::parse_from(["commentview", "c.json", "--react", "+1"]);
        assert_eq!(args.react, Some(ReactionContent::ThumbsUp));
        let args = Args::parse_from(["commentview", "c.json", "-r", "HOORAY"]);
        assert_eq!(args.react, Some(ReactionContent::Hooray));
    }

    #[test]
    fn test_react_rejects_unknown_reaction() {
        let err = Args::try_parse_from(["commentview", "c.json", "--react", "fire"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_remove_requires_react() {
        let err = Args::try_parse_from(["commentview", "c.json", "--remove"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_interactions_keep_order() {
        let args = Args::parse_from([
            "commentview",
            "c.json",
            "-t",
            "1",
            "-t",
            "3",
            "--react",
            "eyes",
            "--remove",
            "--fail",
        ]);
        assert_eq!(
            args.interactions(),
            vec![
                Interaction::Tap(1),
                Interaction::Tap(3),
                Interaction::React {
                    content: ReactionContent::Eyes,
                    is_add: false
                },
            ]
        );
        assert_eq!(args.outcome(), MutationOutcome::Failed);
    }
}
