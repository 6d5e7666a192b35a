use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Days, FixedOffset, TimeZone};
use tokio::sync::watch;
use tracing::error;

use crate::config::Settings;
use crate::{clock, console, coordinator};

/// Next instant strictly after `now` at `hour:00:00` in `now`'s zone.
pub fn next_fire(now: DateTime<FixedOffset>, hour: u32) -> Result<DateTime<FixedOffset>> {
    let tz = *now.offset();
    let at = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow!("{} is not a valid schedule hour", hour))?;
    let today = tz
        .from_local_datetime(&at)
        .single()
        .ok_or_else(|| anyhow!("ambiguous local time {}", at))?;
    if today > now {
        return Ok(today);
    }
    today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow!("schedule overflowed the calendar"))
}

/// Whether a wake-up came too late to still count as the planned occurrence.
pub fn is_misfire(fire: DateTime<FixedOffset>, woke: DateTime<FixedOffset>, grace: Duration) -> bool {
    (woke - fire).to_std().map(|late| late > grace).unwrap_or(false)
}

/// Fire a run every day at the configured hour until Ctrl-C.
pub async fn run_forever(settings: Settings, run_now: bool) -> Result<()> {
    let shutdown = listen_for_interrupt()?;
    drive(settings, run_now, shutdown, |s: &Settings| coordinator::run(s).map(|_| ())).await
}

/// Installed before the first run; an interrupt that lands mid-run stays
/// flagged until the loop looks at it.
#[cfg(unix)]
fn listen_for_interrupt() -> Result<watch::Receiver<bool>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            let _ = tx.send(true);
        }
    });
    Ok(rx)
}

#[cfg(windows)]
fn listen_for_interrupt() -> Result<watch::Receiver<bool>> {
    let mut interrupt = tokio::signal::windows::ctrl_c()?;
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            let _ = tx.send(true);
        }
    });
    Ok(rx)
}

/// Resolves once shutdown was requested; never resolves if the sender is gone.
async fn interrupted(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn drive<R>(
    settings: Settings,
    run_now: bool,
    mut shutdown: watch::Receiver<bool>,
    runner: R,
) -> Result<()>
where
    R: Fn(&Settings) -> Result<()> + Send + Sync + 'static,
{
    let offset = settings.offset();
    let runner = Arc::new(runner);

    if run_now || settings.test_mode_immediate_run {
        console::log(offset, "Testing active, running scrapers immediately");
        trigger(&settings, &runner).await;
    }

    console::log(
        offset,
        format!(
            "Scheduler started, running scrapers daily at {:02}:00 (UTC{:+}).",
            settings.schedule_hour, settings.utc_offset_hours
        ),
    );

    loop {
        if *shutdown.borrow() {
            break;
        }
        let fire = next_fire(clock::now(offset), settings.schedule_hour)?;
        let wait = (fire - clock::now(offset)).to_std().unwrap_or_default();

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = interrupted(&mut shutdown) => break,
        }

        let woke = clock::now(offset);
        if is_misfire(fire, woke, settings.misfire_grace()) {
            console::log(
                offset,
                format!("Missed the {} run by more than the grace window, skipping.", clock::stamp(&fire)),
            );
            continue;
        }
        trigger(&settings, &runner).await;
    }

    console::log(offset, "Stopping scraper and exiting.");
    Ok(())
}

async fn trigger<R>(settings: &Settings, runner: &Arc<R>)
where
    R: Fn(&Settings) -> Result<()> + Send + Sync + 'static,
{
    let offset = settings.offset();
    let s = settings.clone();
    let runner = Arc::clone(runner);
    let result = tokio::task::spawn_blocking(move || runner(&s)).await;

    let failure = match result {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e,
        Err(join) => anyhow::Error::new(join),
    };
    console::log(offset, "Exception occurred when running the scraper, check log for more details");
    error!("Exception occurred when running the scraper: {:?}", failure);
}
