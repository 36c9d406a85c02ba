//! `vdrive-gen` binary: writes the input memory image.

fn main() {
    vdrive_cli::main_with(vdrive_cli::generate::run)
}
