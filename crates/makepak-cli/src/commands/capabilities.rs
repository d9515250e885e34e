use makepak_compiler::Registry;

pub fn run() {
    for name in Registry::standard().named_types() {
        println!("{}", name);
    }
}
