use anyhow::{Context, Result};
use dni_lookup::config::Config;
use std::path::PathBuf;

pub async fn init_config(path: PathBuf) -> Result<()> {
    let config_path = path.join("dni-lookup.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let toml_content = format!(
        "# DNI lookup configuration\n\n{}",
        Config::default().to_toml()?
    );
    std::fs::write(&config_path, toml_content)?;
    println!("Created configuration file: {}", config_path.display());

    Ok(())
}
