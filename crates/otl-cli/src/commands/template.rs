use anyhow::{bail, Result};
use std::path::Path;

const CSV_TEMPLATE: &str = "\
Project,Task,Type,Work_Location_Country,Work_Location_State_Province,Sat_Start,Sat_Stop,Sun_Start,Sun_Stop,Mon_Start,Mon_Stop,Tue_Start,Tue_Stop,Wed_Start,Wed_Stop,Thu_Start,Thu_Stop,Fri_Start,Fri_Stop
ProjX,Task1,Type1,US,CA,,,,,09:00,17:00,09:00,17:00,09:00,17:00,09:00,17:00,09:00,17:00
";

const CONFIG_TEMPLATE: &str = r#"# otl configuration

[browser]
# One of "chrome", "chromium", "edge", "brave"
choice = "chrome"
# Seconds to wait for elements and page redirects before giving up
default_wait_time = 60
# Uncomment to point at a specific binary instead of the platform defaults
# binary = "/usr/bin/google-chrome"
# Uncomment to keep SSO cookies between runs
# profile = "work"

[timecard]
file = "timecard.csv"

[secrets]
# TOML file with `username = "..."` and `password = "..."` lines. If it is
# missing, you type the login into the browser window yourself.
file = "secrets.toml"
"#;

/// Write a starter timecard CSV, and optionally a starter config file
/// next to it. The identifying columns must match the timecard website
/// exactly; the example row is a Mon-Fri nine-to-five.
pub fn execute(output: &Path, with_config: bool, force: bool) -> Result<()> {
    write_checked(output, CSV_TEMPLATE, force)?;
    println!("✅ Wrote {}", output.display());

    if with_config {
        let config_path = output
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("otl.toml");
        write_checked(&config_path, CONFIG_TEMPLATE, force)?;
        println!("✅ Wrote {}", config_path.display());
    }

    println!("Edit the file(s), then run: otl fill");
    Ok(())
}

fn write_checked(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    std::fs::write(path, content)?;
    Ok(())
}
