//! Command: print version information.

/// Print the commitkit version to stdout.
pub fn run() {
    println!("commitkit {}", super::version());
}
