fn main() {
    std::env::set_var("APP_SERVER__PORT", "9000");
    let c = config::Config::builder()
        .set_default("server.port", 8080).unwrap()
        .add_source(config::Environment::with_prefix("app").separator("__").try_parsing(true))
        .build().unwrap();
    println!("{:?}", c);
}
