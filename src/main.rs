fn main() -> std::process::ExitCode {
    genplaylist_lib::run()
}
