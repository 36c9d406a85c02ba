//! `vdrive-check` binary: checks the result memory image.

fn main() {
    vdrive_cli::main_with(vdrive_cli::check::run)
}
