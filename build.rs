fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ENVNODE_CONFIG");

    // Stamp the build time so a node whose RTC lost power can fall back
    // to a sane wall clock during bring-up.
    let epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    println!("cargo:rustc-env=ENVNODE_BUILD_EPOCH={epoch}");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
