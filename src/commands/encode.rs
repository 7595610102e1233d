use std::{error::Error, fs, path::PathBuf};

use clap::Args;
use cuzillion::config::model::ResourceConfig;
use cuzillion::config::walk::initialize_ids;
use cuzillion::factory::Factory;
use cuzillion::serialization::serialize_config;

/// Serialize a JSON config file (wire schema, `"t"` discriminants) into a
/// transport string and the URL it would be served from.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Assign resource ids before encoding
    #[arg(long)]
    pub with_ids: bool,
}

pub async fn run(args: EncodeArgs) -> Result<(), Box<dyn Error>> {
    // 1) Load
    let file_content = fs::read_to_string(&args.config)
        .map_err(|e| format!("failed to read config file '{}': {}", args.config.display(), e))?;
    let mut config: ResourceConfig = serde_json::from_str(&file_content)
        .map_err(|e| format!("failed to parse config file '{}': {}", args.config.display(), e))?;

    // 2) Optionally assign ids, the way page rendering would
    if args.with_ids {
        initialize_ids(&mut config);
    }

    // 3) Encode + print
    let serialized = serialize_config(&config);
    println!("{}", serialized);

    let factory = Factory::default_instance();
    if let Ok(link) = factory.get_link_to(&config) {
        println!("{}", link);
    }

    Ok(())
}
