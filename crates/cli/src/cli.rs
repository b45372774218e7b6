use std::path::PathBuf;

use clap::Parser;

use gsimg_core::config::RunDefaults;
use gsimg_core::PipelineRequest;

/// Config file read when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "gsimg.toml";

/// Archive a Drive image to Cloud Storage, label it with the Vision API and
/// append a summary row to a Google Sheet.
#[derive(Debug, Parser)]
#[command(name = "analyze-gsimg", version, about)]
pub struct Cli {
    /// Image file name on Google Drive
    #[arg(short = 'i', long = "imgfile")]
    pub image: Option<String>,

    /// Cloud Storage bucket to archive into
    #[arg(short = 'b', long = "bucket-id")]
    pub bucket: Option<String>,

    /// Object name prefix inside the bucket
    #[arg(short = 'f', long = "folder")]
    pub folder: Option<String>,

    /// Google Sheets spreadsheet ID
    #[arg(short = 's', long = "sheet-id")]
    pub sheet_id: Option<String>,

    /// Number of Vision labels to keep
    #[arg(
        short = 't',
        long = "viz-top",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub top: Option<u32>,

    /// Print a line after each stage and enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the run request, filling unset flags from the config defaults.
    pub fn request(&self, defaults: &RunDefaults) -> PipelineRequest {
        PipelineRequest {
            file_name: self.image.clone().unwrap_or_else(|| defaults.image.clone()),
            bucket: self.bucket.clone().unwrap_or_else(|| defaults.bucket.clone()),
            folder: self.folder.clone().unwrap_or_else(|| defaults.folder.clone()),
            sheet_id: self
                .sheet_id
                .clone()
                .unwrap_or_else(|| defaults.sheet_id.clone()),
            top: self.top.unwrap_or(defaults.top),
        }
    }

    /// Config path, and whether the user named it explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("analyze-gsimg").chain(args.iter().copied()))
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "-i", "cat.jpg", "-b", "bucket", "-f", "folder", "-s", "sheet", "-t", "3", "-v",
        ])
        .unwrap();

        assert_eq!(cli.image.as_deref(), Some("cat.jpg"));
        assert_eq!(cli.bucket.as_deref(), Some("bucket"));
        assert_eq!(cli.folder.as_deref(), Some("folder"));
        assert_eq!(cli.sheet_id.as_deref(), Some("sheet"));
        assert_eq!(cli.top, Some(3));
        assert!(cli.verbose);
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&[
            "--imgfile",
            "dog.png",
            "--bucket-id",
            "b",
            "--folder",
            "",
            "--sheet-id",
            "s",
            "--viz-top",
            "7",
            "--config",
            "other.toml",
        ])
        .unwrap();

        assert_eq!(cli.image.as_deref(), Some("dog.png"));
        assert_eq!(cli.folder.as_deref(), Some(""));
        assert_eq!(cli.top, Some(7));
        assert!(!cli.verbose);
        assert_eq!(cli.config_path(), (PathBuf::from("other.toml"), true));
    }

    #[test]
    fn test_top_zero_rejected() {
        assert!(parse(&["-t", "0"]).is_err());
        assert!(parse(&["-t", "many"]).is_err());
    }

    #[test]
    fn test_unset_flags_use_defaults() {
        let cli = parse(&["-i", "cat.jpg"]).unwrap();
        let request = cli.request(&RunDefaults::default());

        assert_eq!(request.file_name, "cat.jpg");
        assert_eq!(request.bucket, "YOUR_BUCKET_NAME");
        assert_eq!(request.folder, "");
        assert_eq!(request.sheet_id, "YOUR_SHEET_ID");
        assert_eq!(request.top, 5);
    }

    #[test]
    fn test_flags_override_defaults() {
        let defaults = RunDefaults {
            top: 10,
            ..RunDefaults::default()
        };
        let cli = parse(&["-t", "2", "-b", "mine"]).unwrap();
        let request = cli.request(&defaults);

        assert_eq!(request.top, 2);
        assert_eq!(request.bucket, "mine");
        assert_eq!(request.file_name, "YOUR_IMG_ON_DRIVE");
    }

    #[test]
    fn test_top_flag_replaces_zero_default() {
        let defaults = RunDefaults {
            top: 0,
            ..RunDefaults::default()
        };

        let request = parse(&["-t", "3"]).unwrap().request(&defaults);
        assert_eq!(request.top, 3);
        assert!(request.validate().is_ok());

        let request = parse(&[]).unwrap().request(&defaults);
        assert!(request.validate().is_err());
    }
}
