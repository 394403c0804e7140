use anyhow::{Context, Result};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use otl_browser::{BrowserFinder, LaunchOptions, ProfileManager, Session};
use otl_core::{BrowserChoice, Config, Credentials, TimecardReader, TimecardRow};
use otl_ebs::{Authenticator, Navigator, TimecardFiller, Urls};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config_path: &Path,
    csv: Option<PathBuf>,
    browser: Option<String>,
    browser_binary: Option<PathBuf>,
    headless: bool,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        // Step 1: Resolve config, credentials, and the CSV before touching
        // a browser, so bad input fails fast
        let config = Config::load_or_default(config_path)?;

        let choice: BrowserChoice = browser
            .as_deref()
            .unwrap_or(&config.browser.choice)
            .parse()?;
        let binary_override = browser_binary.or_else(|| config.browser.binary.clone());
        let headless = headless || config.browser.headless;

        let mut credentials = Credentials::load(&config.secrets.file)?;
        if let Some(username) = username {
            credentials.username = Some(username);
        }
        if let Some(password) = password {
            credentials.password = Some(password);
        }

        let csv_path = csv.unwrap_or_else(|| config.timecard.file.clone());
        let rows = TimecardReader::from_file(&csv_path)
            .with_context(|| format!("reading timecard CSV {}", csv_path.display()))?;
        if rows.is_empty() {
            println!("Nothing to fill: {} has no data rows", csv_path.display());
            return Ok(());
        }

        // Step 2: Find the browser binary
        println!("🔍 Locating {}...", choice);
        let finder = BrowserFinder::new(choice, binary_override);
        let binary = finder.find()?;
        println!("✅ Found browser at: {}", binary.display());

        // Step 3: Set up the profile
        let profile = if let Some(name) = &config.browser.profile {
            println!("📁 Using profile: {}", name);
            ProfileManager::named(name)?
        } else {
            println!("📁 Using temporary profile");
            ProfileManager::temporary()?
        };

        // Step 4: Launch the session
        println!("🚀 Launching browser...");
        let session = Session::launch(LaunchOptions {
            binary,
            user_data_dir: profile.path().to_path_buf(),
            headless,
            default_wait: Duration::from_secs(config.browser.default_wait_time),
        })
        .await?;

        let urls = Urls::resolve(&config.urls);
        let result = run_flow(&session, &urls, &credentials, &rows).await;

        match &result {
            Ok(()) => {
                println!();
                println!(
                    "✅ Timecard filled. {}",
                    style("Review it in the browser and submit it there.").bold()
                );
            }
            Err(e) => {
                println!();
                println!("❌ Fill failed: {:#}", e);
                println!("   Anything already typed into the timecard is left as-is.");
            }
        }

        // The timecard is not submitted by this tool; closing the browser
        // now would throw the entries away
        println!("Press Enter to close the browser...");
        let term = Term::stdout();
        let _ = term.read_line();

        if let Err(e) = session.close().await {
            tracing::warn!("Browser did not close cleanly: {}", e);
        }

        result
    })
}

async fn run_flow(
    session: &Session,
    urls: &Urls,
    credentials: &Credentials,
    rows: &[TimecardRow],
) -> Result<()> {
    println!("🔐 Signing in...");
    let authenticator = Authenticator::new(session, urls, credentials);
    authenticator.open_home().await?;

    println!("🧭 Navigating to Recent Timecards...");
    let navigator = Navigator::new(session, urls);
    navigator.to_recent_timecards().await?;
    navigator.create_new_timecard().await?;

    println!("✏️  Filling {} CSV rows...", rows.len());
    let bar = ProgressBar::new(rows.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} rows",
    )?);

    let filler = TimecardFiller::new(session);
    let fill_result = filler.fill(rows, |_| bar.inc(1)).await;
    bar.finish_and_clear();
    fill_result?;

    Ok(())
}
