use std::io::Write;

use matchtimer_core::stage::MAP_STAGES;
use matchtimer_core::{AppConfig, AppConfigExt, EventKind, format_elapsed, parse_match_time};
use matchtimer_core::{MatchSession, RespawnSchedule};
use matchtimer_types::EventStatus;

use crate::CliContext;

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

pub async fn start(ctx: &CliContext) -> Result<(), String> {
    let mut session = ctx.session.lock().await;
    if session.is_running() && !session.is_paused() {
        return Err("match is already running\n".to_string());
    }
    session.start();
    println!("Match running at {}", format_elapsed(session.elapsed()));
    Ok(())
}

pub async fn pause(ctx: &CliContext) -> Result<(), String> {
    let mut session = ctx.session.lock().await;
    if !session.is_running() || session.is_paused() {
        return Err("match is not running\n".to_string());
    }
    session.pause();
    println!("Paused at {}", format_elapsed(session.elapsed()));
    Ok(())
}

pub async fn resume(ctx: &CliContext) -> Result<(), String> {
    let mut session = ctx.session.lock().await;
    if !session.is_paused() {
        return Err("match is not paused\n".to_string());
    }
    session.resume();
    println!("Resumed at {}", format_elapsed(session.elapsed()));
    Ok(())
}

pub async fn reset(ctx: &CliContext) -> Result<(), String> {
    ctx.session.lock().await.reset();
    println!("Match reset");
    Ok(())
}

pub async fn seek(ctx: &CliContext, time: &str) -> Result<(), String> {
    let seconds =
        parse_match_time(time).ok_or_else(|| format!("invalid match time: {time}\n"))?;
    let mut session = ctx.session.lock().await;
    session.set_time(seconds);
    println!("Match time set to {}", format_elapsed(session.elapsed()));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

pub async fn clear(ctx: &CliContext, id: &str) -> Result<(), String> {
    let mut session = ctx.session.lock().await;
    if session.event(id).is_none() {
        return Err(format!("unknown event: {id}\n"));
    }
    let duration = session
        .mark_cleared(id)
        .ok_or_else(|| format!("{id} does not respawn on clear\n"))?;
    println!("{id} respawns in {}", format_elapsed(duration));
    Ok(())
}

pub async fn toggle_sound(ctx: &CliContext, id: &str) -> Result<(), String> {
    let enabled = ctx
        .session
        .lock()
        .await
        .toggle_event_sound(id)
        .ok_or_else(|| format!("unknown event: {id}\n"))?;
    println!("Sound for {id}: {}", if enabled { "on" } else { "off" });
    Ok(())
}

pub async fn mute(ctx: &CliContext, on: bool, off: bool) -> Result<(), String> {
    let mut session = ctx.session.lock().await;
    let muted = match (on, off) {
        (true, _) => {
            session.set_muted(true);
            true
        }
        (_, true) => {
            session.set_muted(false);
            false
        }
        _ => session.toggle_mute(),
    };
    println!("Sound {}", if muted { "muted" } else { "unmuted" });
    Ok(())
}

pub async fn show_events(ctx: &CliContext) -> Result<(), String> {
    let session = ctx.session.lock().await;
    print!("{}", render_events(&session));
    Ok(())
}

fn render_events(session: &MatchSession) -> String {
    let mut out = format!(
        "{} {}\n{:<4}{:<28}{:<12}{:>8}  {:<6}Sound\n{}\n",
        format_elapsed(session.elapsed()),
        clock_label(session),
        "",
        "Event",
        "Status",
        "In",
        "Kills",
        "-".repeat(66)
    );

    for state in session.sorted_events() {
        let def = state.definition();
        let countdown = match state.status() {
            EventStatus::Completed | EventStatus::Available => "-".to_string(),
            _ => format_elapsed(state.countdown().ceil()),
        };
        let kills = if def.is_manual_respawn() {
            state.kill_count().to_string()
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:<4}{:<28}{:<12}{:>8}  {:<6}{}\n",
            def.icon,
            def.name,
            state.status().label(),
            countdown,
            kills,
            if state.sound_enabled() { "on" } else { "off" }
        ));
    }
    out
}

fn clock_label(session: &MatchSession) -> &'static str {
    match (session.is_running(), session.is_paused()) {
        (false, _) => "(idle)",
        (true, true) => "(paused)",
        (true, false) => "(running)",
    }
}

pub async fn show_log(ctx: &CliContext, limit: Option<usize>) -> Result<(), String> {
    let session = ctx.session.lock().await;
    let log = session.log();
    if log.is_empty() {
        println!("No events yet");
        return Ok(());
    }
    for entry in log.entries().take(limit.unwrap_or(usize::MAX)) {
        println!("[{}] {} {}", format_elapsed(entry.time), entry.icon, entry.message);
    }
    Ok(())
}

pub async fn show_stage(ctx: &CliContext) -> Result<(), String> {
    let elapsed = ctx.session.lock().await.elapsed();
    let index = matchtimer_core::stage::stage_index(elapsed);
    println!("Map stage: {}", MAP_STAGES[index].label);
    if let Some(next) = MAP_STAGES.get(index + 1) {
        println!(
            "Next: {} in {}",
            next.label,
            format_elapsed(f64::from(next.min_time) - elapsed)
        );
    }
    Ok(())
}

pub async fn show_catalog(ctx: &CliContext) -> Result<(), String> {
    println!("{:<20}{:<28}{:<16}{:<10}{:>8}  Respawn", "Id", "Name", "Type", "Priority", "First");
    println!("{}", "-".repeat(96));
    for def in ctx.catalog.definitions() {
        let respawn = match &def.kind {
            EventKind::AutoRecurring { interval } => format!("every {}", format_elapsed(*interval)),
            EventKind::ManualRespawn { schedule: RespawnSchedule::Fixed(secs) } => {
                format_elapsed(*secs)
            }
            EventKind::ManualRespawn { schedule: RespawnSchedule::Decreasing(times) } => times
                .iter()
                .map(|t| format_elapsed(*t))
                .collect::<Vec<_>>()
                .join(" > "),
            EventKind::OneTimeSpawn | EventKind::Milestone => String::new(),
        };
        println!(
            "{:<20}{:<28}{:<16}{:<10}{:>8}  {}",
            def.id,
            def.name,
            def.kind.label(),
            def.priority.label(),
            format_elapsed(def.first_spawn),
            respawn
        );
    }
    println!("\nTotal: {} events", ctx.catalog.len());
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    match AppConfig::config_file() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({e})"),
    }
    println!("Preferences: {}", config.preferences_file().display());
    println!(
        "Catalog: {}",
        config
            .catalog_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    println!("Tick rate: {} Hz", config.tick_hz());
    println!(
        "Audio: {} (volume {})",
        if config.audio.enabled { "enabled" } else { "disabled" },
        config.audio.volume
    );
    Ok(())
}

pub async fn exit(ctx: &CliContext) {
    ctx.tasks.lock().await.abort_all();
    let _ = write!(std::io::stdout(), "quitting...");
    let _ = std::io::stdout().flush();
}
