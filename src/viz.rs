use crate::recorder::AssignmentLog;
use anyhow::Result;
use chrono::Local;
use colored::*;
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

/// How the recorded assignment history should be played back.
pub struct ReplayOptions {
    /// Directory for numbered frame files; None keeps the replay on screen only.
    pub frame_dir: Option<PathBuf>,
    pub color: bool,
    /// Pause for Enter after each frame.
    pub step: bool,
    /// Stop after this many frames (0 = all).
    pub max_frames: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            frame_dir: None,
            color: false,
            step: false,
            max_frames: 0,
        }
    }
}

/// Plays the assignment history back frame by frame.
///
/// Purely presentational: errors here are for the caller to report as a
/// notice, never to feed back into solving.
pub fn replay(log: &AssignmentLog, opts: &ReplayOptions) -> Result<()> {
    if let Some(dir) = &opts.frame_dir {
        fs::create_dir_all(dir)?;
    }
    for (i, frame) in log.frames().iter().enumerate() {
        if opts.max_frames != 0 && i >= opts.max_frames {
            break;
        }
        let title = format!("Step {}: {} := {}", i + 1, frame.cell, frame.digit);
        let board = frame.grid.to_candidate_string();

        if opts.color {
            println!("{} {}\n{}", "➤".blue().bold(), title.bold(), board);
        } else {
            println!("➤ {}\n{}", title, board);
        }

        if let Some(dir) = &opts.frame_dir {
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut f = File::create(dir.join(format!("frame({}).txt", i + 1)))?;
            writeln!(f, "[{}] {}\n\n{}", ts, title, board)?;
        }

        if opts.step {
            print!("-- press Enter to continue --");
            use std::io::{self, Write as _};
            io::stdout().flush().ok();
            let mut s = String::new();
            io::stdin().read_line(&mut s).ok();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::topology::Cell;

    #[test]
    fn replay_writes_one_file_per_frame() {
        let mut log = AssignmentLog::new();
        log.record(Cell { r: 0, c: 0 }, 4, &Grid::blank());
        log.record(Cell { r: 3, c: 3 }, 8, &Grid::blank());

        let dir = std::env::temp_dir().join("diadoku_replay_test");
        let _ = fs::remove_dir_all(&dir);
        let opts = ReplayOptions {
            frame_dir: Some(dir.clone()),
            ..Default::default()
        };
        replay(&log, &opts).unwrap();

        let written = fs::read_dir(&dir).unwrap().count();
        assert_eq!(written, 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn max_frames_caps_the_replay() {
        let mut log = AssignmentLog::new();
        for d in 1..=5 {
            log.record(Cell { r: 0, c: d as usize - 1 }, d, &Grid::blank());
        }

        let dir = std::env::temp_dir().join("diadoku_replay_cap_test");
        let _ = fs::remove_dir_all(&dir);
        let opts = ReplayOptions {
            frame_dir: Some(dir.clone()),
            max_frames: 3,
            ..Default::default()
        };
        replay(&log, &opts).unwrap();

        assert_eq!(fs::read_dir(&dir).unwrap().count(), 3);
        let _ = fs::remove_dir_all(&dir);
    }
}
