use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub database_path: String,
    pub archive_dir: String,
    pub generated_dir: String,
    pub upload_max_bytes: usize,
    /// Binary used to turn letters into PDF; `None` disables PDF output.
    pub pdf_engine: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 5500,
            database_path: "./arsip.db".into(),
            archive_dir: "./arsip".into(),
            generated_dir: "./generated".into(),
            upload_max_bytes: 25 * 1024 * 1024,
            pdf_engine: Some("wkhtmltopdf".into()),
        }
    }
}

fn parse_pdf_engine(raw: Option<String>) -> Option<String> {
    match raw {
        None => Config::default().pdf_engine,
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty()
                || trimmed.eq_ignore_ascii_case("none")
                || trimmed.eq_ignore_ascii_case("off")
            {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();
        let api_port = lookup("API_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.api_port);
        let database_path = lookup("DATABASE_PATH").unwrap_or(defaults.database_path);
        let archive_dir = lookup("ARCHIVE_DIR").unwrap_or(defaults.archive_dir);
        let generated_dir = lookup("GENERATED_DIR").unwrap_or(defaults.generated_dir);
        let upload_max_bytes = lookup("UPLOAD_MAX_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.upload_max_bytes);
        let pdf_engine = parse_pdf_engine(lookup("PDF_ENGINE"));

        for (name, value) in [
            ("DATABASE_PATH", &database_path),
            ("ARCHIVE_DIR", &archive_dir),
            ("GENERATED_DIR", &generated_dir),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
        }

        Ok(Self {
            api_port,
            database_path,
            archive_dir,
            generated_dir,
            upload_max_bytes,
            pdf_engine,
        })
    }
}
