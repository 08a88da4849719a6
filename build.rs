//! Enforces the platform-selection contract: exactly one of
//! `platform-baremetal`, `platform-rtos`, `platform-posix` must be enabled.

fn main() {
    let enabled = |feature: &str| std::env::var(feature).is_ok();

    let selected = [
        enabled("CARGO_FEATURE_PLATFORM_BAREMETAL"),
        enabled("CARGO_FEATURE_PLATFORM_RTOS"),
        enabled("CARGO_FEATURE_PLATFORM_POSIX"),
    ]
    .iter()
    .filter(|enabled| **enabled)
    .count();

    if selected == 0 {
        panic!(
            "no platform selected! enable exactly one of: \
             platform-baremetal, platform-rtos, platform-posix"
        );
    }
    if selected > 1 {
        panic!(
            "multiple platforms selected: enable exactly one of \
             platform-baremetal, platform-rtos, platform-posix"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
