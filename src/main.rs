fn main() -> std::process::ExitCode {
    build_bootstrap_lib::run()
}
