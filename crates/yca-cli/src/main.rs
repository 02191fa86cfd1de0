//! yca - YouTube Comment Analyzer CLI
//!
//! Classifies the comments of a video as positive, negative or irrelevant.
//!
//! ## Quick Start
//!
//! ```bash
//! # Analyze a comment file
//! yca analyze comments.csv
//!
//! # Fetch comments of a video (needs YOUTUBE_API_KEY) and analyze them
//! yca fetch https://www.youtube.com/watch?v=dQw4w9WgXcQ --analyze
//!
//! # Interactive dashboard
//! yca analyze --video dQw4w9WgXcQ --tui
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
