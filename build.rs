use std::env;
use std::path::Path;

// FFmpeg discovery is handled by ffmpeg-sys-next; this script only surfaces
// actionable hints when a Windows build is about to fail for want of the
// FFMPEG_DIR / vcpkg environment.
fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");
    println!("cargo:rerun-if-env-changed=VCPKGRS_DYNAMIC");
    println!("cargo:rerun-if-env-changed=VCPKGRS_TRIPLET");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }
    if env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!(
            "cargo:warning=FFMPEG_DIR is not set. On Windows, install FFmpeg via vcpkg and set VCPKG_ROOT + FFMPEG_DIR for reliable builds."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let install_dir = Path::new(&vcpkg_root).join("installed").join(&triplet);

    if !install_dir.exists() {
        println!(
            "cargo:warning=VCPKG_ROOT is set but no FFmpeg install was found at {}.",
            install_dir.display(),
        );
        return;
    }

    println!(
        "cargo:warning=Detected vcpkg FFmpeg at {}. Set FFMPEG_DIR={} to make ffmpeg-sys-next discovery explicit.",
        install_dir.display(),
        install_dir.display(),
    );
    if env::var_os("VCPKGRS_DYNAMIC").is_none() {
        println!(
            "cargo:warning=Set VCPKGRS_DYNAMIC=1 when linking against vcpkg's dynamic FFmpeg builds."
        );
    }
}
