use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // Cortex-M parts; the only targets `cortex-m` is a dependency for.
        bare_metal_arm: { all(target_arch = "arm", target_os = "none") },
    }
}
