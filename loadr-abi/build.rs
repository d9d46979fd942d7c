use std::process::Command;

// Modules and the host must be built by the same compiler: `dyn Setup` and the
// scenario records cross the library boundary with the Rust ABI.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let out = Command::new(rustc).arg("--version").output()?;
    let version = String::from_utf8(out.stdout)?;

    println!("cargo:rustc-env=LOADR_RUSTC_VERSION={}", version.trim());
    println!("cargo:rerun-if-env-changed=RUSTC");
    Ok(())
}
