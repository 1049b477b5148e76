//! A [`StreamPlayer`] backed by the `mpv` program.
//!
//! mpv handles the network connection and decoding. We only read its terminal
//! output: `icy-title:` lines become timed metadata and the audio-output line
//! marks the stream as ready. A process that exits without being asked to is
//! a failed stream.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::config::PlayerSettings;

use super::feed::PlayerFeed;
use super::types::{PlayerEvent, PlayerStatus};
use super::{PlayerFactory, StreamPlayer};

const ICY_TITLE_PREFIX: &str = "icy-title:";
const AUDIO_OUT_PREFIX: &str = "AO:";
const REAP_POLL: Duration = Duration::from_millis(50);

/// Spawns one [`MpvPlayer`] per play cycle.
#[derive(Debug, Clone)]
pub struct MpvFactory {
    program: String,
    extra_args: Vec<String>,
}

impl MpvFactory {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            extra_args: settings.extra_args.clone(),
        }
    }
}

impl PlayerFactory for MpvFactory {
    fn create(&self, url: &str, feed: PlayerFeed) -> Box<dyn StreamPlayer> {
        Box::new(MpvPlayer {
            program: self.program.clone(),
            args: mpv_args(&self.extra_args, url),
            feed,
            child: None,
            stopping: Arc::new(AtomicBool::new(false)),
        })
    }
}

pub struct MpvPlayer {
    program: String,
    args: Vec<String>,
    feed: PlayerFeed,
    child: Option<Arc<Mutex<Child>>>,
    stopping: Arc<AtomicBool>,
}

fn mpv_args(extra_args: &[String], url: &str) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--no-video".into(),
        "--quiet".into(),
        "--display-tags=icy-title".into(),
    ];
    args.extend(extra_args.iter().cloned());
    args.push("--".into());
    args.push(url.to_string());
    args
}

/// Map one line of mpv output to a player event.
pub(super) fn parse_line(line: &str) -> Option<PlayerEvent> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix(ICY_TITLE_PREFIX) {
        return Some(PlayerEvent::TimedMetadata(vec![rest.trim().to_string()]));
    }
    if line.starts_with(AUDIO_OUT_PREFIX) {
        return Some(PlayerEvent::Status(PlayerStatus::ReadyToPlay));
    }
    None
}

/// Wait for the process to exit without holding its lock, so `stop` can
/// still kill it if mpv closed its output early.
fn reap(child: &Mutex<Child>, stopping: &AtomicBool) -> Option<ExitStatus> {
    loop {
        match child.lock().ok()?.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if stopping.load(Ordering::SeqCst) => return None,
            Ok(None) => {}
            Err(_) => return None,
        }
        thread::sleep(REAP_POLL);
    }
}

impl StreamPlayer for MpvPlayer {
    fn start(&mut self) {
        if self.child.is_some() {
            return;
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to start {}: {e}", self.program);
                self.feed.status(PlayerStatus::Failed);
                return;
            }
        };
        log::debug!("started {} (pid {})", self.program, child.id());

        let stdout = child.stdout.take();
        let child = Arc::new(Mutex::new(child));
        self.child = Some(child.clone());

        let feed = self.feed.clone();
        let stopping = self.stopping.clone();
        thread::spawn(move || {
            if let Some(out) = stdout {
                for line in BufReader::new(out).lines().map_while(Result::ok) {
                    if let Some(event) = parse_line(&line) {
                        feed.send(event);
                    }
                }
            }

            let status = reap(&child, &stopping);
            if stopping.load(Ordering::SeqCst) {
                return;
            }
            match status {
                Some(s) => log::warn!("stream player exited on its own ({s})"),
                None => log::warn!("stream player exited on its own"),
            }
            feed.status(PlayerStatus::Failed);
        });
    }

    fn stop(&mut self) {
        self.stopping.store(true, Ordering::SeqCst);
        let Some(child) = self.child.take() else {
            return;
        };
        if let Ok(mut c) = child.lock() {
            if let Err(e) = c.kill() {
                log::debug!("stream player already gone: {e}");
            }
            let _ = c.wait();
        }
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
