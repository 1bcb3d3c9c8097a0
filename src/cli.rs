//! CLI argument parsing with clap.

use clap::Parser;

/// Graphic designer tool - describe a visual, get a generated image.
#[derive(Parser, Debug)]
#[command(name = "graphic-designer", version, about)]
pub struct Cli {
    /// Description of the visual you want to create.
    #[arg(conflicts_with = "prompt_file")]
    pub description: Option<String>,

    /// Path to a file containing the description.
    #[arg(short = 'p', long, conflicts_with = "description")]
    pub prompt_file: Option<String>,

    /// Output file path; the extension selects the format (auto-generated PNG if omitted).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Parameter file path override.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the description from either the positional argument or the file flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is provided, or if the file cannot be read.
    pub fn resolve_description(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.description {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            Ok(std::fs::read_to_string(path)?.trim_end().to_string())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a visual description or use -p/--prompt-file",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_description() {
        let cli = Cli::parse_from(["graphic-designer", "a forest at sunset"]);
        assert_eq!(cli.description.as_deref(), Some("a forest at sunset"));
        assert!(cli.prompt_file.is_none());
        assert_eq!(cli.resolve_description().unwrap(), "a forest at sunset");
    }

    #[test]
    fn prompt_file_flag() {
        let dir = std::env::temp_dir().join("designer_cli_pf_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("description.txt");
        std::fs::write(&path, "description from file\n").unwrap();

        let cli = Cli::parse_from(["graphic-designer", "-p", path.to_str().unwrap()]);
        assert!(cli.description.is_none());
        assert_eq!(cli.resolve_description().unwrap(), "description from file");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["graphic-designer", "a cat"]);
        assert!(cli.output.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "graphic-designer",
            "-o",
            "out.jpg",
            "-c",
            "configs/other.yml",
            "-v",
            "a landscape",
        ]);
        assert_eq!(cli.output.as_deref(), Some("out.jpg"));
        assert_eq!(cli.config.as_deref(), Some("configs/other.yml"));
        assert!(cli.verbose);
        assert_eq!(cli.description.as_deref(), Some("a landscape"));
    }

    #[test]
    fn description_and_file_conflict() {
        assert!(Cli::try_parse_from(["graphic-designer", "-p", "x.txt", "a cat"]).is_err());
    }

    #[test]
    fn no_description_errors() {
        let cli = Cli::parse_from(["graphic-designer"]);
        assert!(cli.resolve_description().is_err());
    }
}
