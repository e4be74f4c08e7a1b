#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(arg_required_else_help = true)]
pub struct Args {
    /// Route to forward to, e.g. logstash+tcp://logstash.local:5000
    #[clap(long, env = "LOGSTASH_ROUTE", value_name = "ROUTE_URI")]
    pub route: String,

    /// Container name attached to every line
    #[clap(long, default_value = "")]
    pub container_name: String,

    /// Container ID attached to every line
    #[clap(long, default_value = "")]
    pub container_id: String,

    /// Image reference attached to every line
    #[clap(long, default_value = "")]
    pub image: String,

    /// Container hostname attached to every line
    #[clap(long, default_value = "")]
    pub hostname: String,

    /// Stream name recorded as the source of each line.
    #[clap(long, default_value = "stdout")]
    pub source: String,
}

impl Args {
    pub fn route(&self) -> &str {
        &self.route
    }
}
