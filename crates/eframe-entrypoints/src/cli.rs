use clap::Parser;

/// Parse the command line arguments into `T`.
fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}

/// Parse the command line, exiting with clap's usage message on error.
pub fn parse_args_or_exit<T: Parser>() -> T {
    match parse_args::<T>() {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
