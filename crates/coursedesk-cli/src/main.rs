//! # coursedesk CLI
//!
//! Entry point of the `coursedesk` binary. All work happens in [`cli::run`];
//! this file only turns a failure into a message on stderr and exit code 1.
//!
//! ```text
//! coursedesk list chapter --parent <SUBJECT_ID> --sort title
//! coursedesk browse <LEVEL_ID> <SUBJECT_ID>
//! coursedesk export exercise --parent <CHAPTER_ID> --format json
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
