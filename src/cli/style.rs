use indicatif::{ProgressFinish, ProgressStyle};

pub mod parse {
    use super::*;

    pub fn with_progress() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner} {msg}")
            .tick_strings(&["▹▹▹▹▹", "▸▹▹▹▹", "▹▸▹▹▹", "▹▹▸▹▹", "▹▹▹▸▹", "▹▹▹▹▸", "▪▪▪▪▪"])
            .on_finish(ProgressFinish::AndLeave)
    }
}

pub mod run {
    use super::*;

    pub fn scanning() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("[{elapsed_precise}] {spinner} {pos:>12} reads {msg}")
            .on_finish(ProgressFinish::AndLeave)
    }

    pub fn finished() -> ProgressStyle {
        ProgressStyle::default_spinner().template("[{elapsed_precise}] {msg}").on_finish(ProgressFinish::AndLeave)
    }
}
