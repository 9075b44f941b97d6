use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                println!("{}", render_schema()?);
                Ok(())
            }
        }
    }
}

fn render_schema() -> anyhow::Result<String> {
    let schema = crate::shared::config::generate_schema();
    Ok(serde_json::to_string_pretty(&schema)?)
}
