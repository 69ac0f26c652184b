fn main() -> Result<(), Box<dyn std::error::Error>> {
    tabchat::cli::main()
}
