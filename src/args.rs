use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct GradebookArgs {
    /// Database connection string
    #[clap(long, env = "GRADEBOOK_DATABASE_URL", default_value = "sqlite:gradebook.db")]
    pub database_url: String,

    /// Address to listen on
    #[clap(long, env = "GRADEBOOK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port
    #[clap(long, env = "GRADEBOOK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Emit logs as JSON lines
    #[clap(long, env = "GRADEBOOK_LOG_JSON")]
    pub log_json: bool,
}
