use anyhow::Result;
use hallcal_core::config::HallConfig;
use owo_colors::OwoColorize;

pub fn run(config: &HallConfig) -> Result<()> {
    let config_path = HallConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
