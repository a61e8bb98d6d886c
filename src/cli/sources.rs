//! Sources command implementation

use anyhow::Result;

use super::EngineArgs;

pub fn run(engine_args: &EngineArgs) -> Result<()> {
    let engine = engine_args.engine()?;

    if let Some(env) = &engine.options().env {
        println!("Environment: {}", env);
    }
    println!("Sources (highest priority first):");
    for (index, source) in engine.sources().iter().enumerate() {
        println!("  {}. {} ({})", index + 1, source.path.display(), source.format);
    }

    Ok(())
}
