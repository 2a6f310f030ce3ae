use clap::Parser;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-gateway")]
#[command(about = "Question/answer gateway in front of a text-generation backend")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // SQLite file (or sqlite:: URL) holding the question/answer log
    #[arg(short, long, env = "DATABASE_NAME", default_value = "chatbot.db")]
    pub database: String,

    // Text-generation backend
    #[arg(short, long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    // Model name passed to the backend
    #[arg(short, long, env = "MODEL_NAME", default_value = "gpt2")]
    pub model: String,

    // Generation-length cap
    #[arg(long, default_value_t = 50)]
    pub max_tokens: u32,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 5)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Optional static key, forwarded to the backend as a bearer token
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Debug switch, only the exact string "True" turns it on
    #[arg(long, env = "DEBUG", default_value = "False")]
    pub debug: String,
}

impl Args {
    pub fn debug_enabled(&self) -> bool {
        parse_debug_flag(&self.debug)
    }

    // sqlx wants a URL, a bare file name is treated as a path
    pub fn database_url(&self) -> String {
        if self.database.starts_with("sqlite:") {
            self.database.clone()
        } else {
            format!("sqlite://{}", self.database)
        }
    }
}

/// Parses the `DEBUG` value. Anything other than `"True"` is false; values other
/// than `"True"`/`"False"` are reported so typos like `true` don't go unnoticed.
pub fn parse_debug_flag(raw: &str) -> bool {
    match raw {
        "True" => true,
        "False" => false,
        other => {
            tracing::warn!(
                "DEBUG environment variable set to invalid value: '{}'. Defaulting to False.",
                other
            );
            false
        }
    }
}
