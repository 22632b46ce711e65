use csvforge_generate::generators::GeneratorRegistry;

fn main() {
    let registry = GeneratorRegistry::new();
    for data_type in registry.data_types() {
        match data_type.range_hint() {
            Some(hint) => println!("{data_type}\t{hint}"),
            None => println!("{data_type}"),
        }
    }
}
