fn main() {
    if let Err(err) = belofte_tools::template::run(std::env::args_os()) {
        eprintln!("Error creating Excel template: {err:#}");
        std::process::exit(1);
    }
}
