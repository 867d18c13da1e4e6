use std::process::Command;

fn main() {
    // Prefer COMMITKIT_VERSION if set (release builds), otherwise git describe.
    if let Ok(version) = std::env::var("COMMITKIT_VERSION") {
        println!("cargo:rustc-env=COMMITKIT_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=COMMITKIT_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=COMMITKIT_VERSION");
}
