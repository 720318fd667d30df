use mgcbsync_core::{ContentSync, SyncConfig};
use std::io::Write;
use tracing::info;

pub fn run(config: SyncConfig, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let sync = ContentSync::new(config)?;
    info!(
        "Syncing {} into {}",
        sync.config().content_dir.display(),
        sync.mgcb_path().display()
    );

    let stdout = std::io::stdout();
    sync_to(&sync, dry_run, &mut stdout.lock())
}

/// Run one sync and write the progress lines to `out`.
fn sync_to(
    sync: &ContentSync,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = sync.plan()?;
    if plan.is_empty() {
        writeln!(out, "nothing new")?;
        return Ok(());
    }

    writeln!(out, "found {} new asset(s). adding in", plan.pending.len())?;

    if dry_run {
        for asset in sync.preview(&plan).added {
            writeln!(out, "  + {}", asset)?;
        }
        writeln!(out, "dry run, {} left unchanged", sync.mgcb_path().display())?;
        return Ok(());
    }

    // Echo each stanza as soon as it is on disk; keep the first echo failure.
    let mut echo_err = None;
    let appended = sync.apply_with(&plan, |asset| {
        if echo_err.is_none() {
            echo_err = writeln!(out, "  + {}", asset).err();
        }
    });
    appended?;
    if let Some(e) = echo_err {
        return Err(e.into());
    }

    Ok(())
}
