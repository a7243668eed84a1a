mod audit;
mod config;
mod error;
mod grammar;
mod layout;
mod library;
mod metadata;
mod normalize;
mod organize;
mod paths;
mod prompt;
mod rename;
mod runtime;
mod tags;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
