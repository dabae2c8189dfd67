use std::path::PathBuf;

use clap::Parser;

/// pixglyph : image → ASCII art, et ASCII art → image.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(short = 'p', long = "path", default_value = "test.jpg")]
    pub path: PathBuf,

    /// Largeur cible en caractères. Défaut : valeur de la config (120).
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Écrire le rendu PNG de l'ASCII dans ce fichier, sans question.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ne pas demander après l'affichage s'il faut sauvegarder l'ASCII en image.
    #[arg(long, default_value_t = false)]
    pub no_prompt: bool,

    /// Mode inverse seul : rasteriser un fichier texte ASCII existant.
    #[arg(long, conflicts_with = "event")]
    pub text: Option<PathBuf>,

    /// Ne pas ignorer la première ligne du texte lors de la rasterisation.
    #[arg(long, default_value_t = false)]
    pub keep_header: bool,

    /// Hinting de la police : none, full.
    #[arg(long)]
    pub hinting: Option<String>,

    /// Traiter un événement de requête JSON (corps base64) et écrire la réponse JSON.
    #[arg(long)]
    pub event: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Reverse mode needs somewhere to write the image.
    ///
    /// # Errors
    /// Returns an error if `--text` is given without `--output`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.text.is_some() && self.output.is_none() {
            anyhow::bail!("--text requiert --output <FICHIER>.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_flags() {
        let cli = Cli::parse_from(["pixglyph"]);
        assert_eq!(cli.path, PathBuf::from("test.jpg"));
        assert_eq!(cli.width, None);
        assert!(!cli.no_prompt);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from(["pixglyph", "-w", "80", "-p", "cat.png", "-o", "cat_ascii.png"]);
        assert_eq!(cli.width, Some(80));
        assert_eq!(cli.path, PathBuf::from("cat.png"));
        assert_eq!(cli.output, Some(PathBuf::from("cat_ascii.png")));
    }

    #[test]
    fn prompt_can_be_disabled() {
        let cli = Cli::parse_from(["pixglyph", "--no-prompt"]);
        assert!(cli.no_prompt);
    }

    #[test]
    fn text_without_output_is_rejected() {
        let cli = Cli::parse_from(["pixglyph", "--text", "art.txt"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn text_and_event_conflict() {
        assert!(Cli::try_parse_from(["pixglyph", "--text", "a.txt", "--event", "e.json"]).is_err());
    }
}
