//! `vdrive` binary: runs `testbench_top` to completion.

fn main() {
    vdrive_cli::main_with(vdrive_cli::sim::run)
}
