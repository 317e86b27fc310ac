//! `figdl config` – print config path and effective values.

use anyhow::Result;
use figdl_core::config::{self, FigdlConfig};
use figdl_core::strategy::Strategy;

pub fn run_show_config(cfg: &FigdlConfig) -> Result<()> {
    println!("Config file: {}", config::config_path()?.display());
    println!("  source_url:      {}", cfg.source_url);
    println!("  output_dir:      {}", cfg.output_dir.display());
    println!("  user_agent:      {}", cfg.user_agent);
    println!(
        "  timeouts:        request {}s, navigation {}s",
        cfg.request_timeout_secs, cfg.navigation_timeout_secs
    );
    println!(
        "  settle:          {}s (+{}s after scroll)",
        cfg.settle_secs, cfg.scroll_settle_secs
    );
    match &cfg.chromium_path {
        Some(p) => println!("  chromium_path:   {}", p.display()),
        None => println!("  chromium_path:   (search PATH)"),
    }
    for s in [Strategy::Scrape, Strategy::Sniff, Strategy::Extract] {
        println!("  delay ({s}): {} ms", cfg.delay_for(s).as_millis());
    }
    Ok(())
}
