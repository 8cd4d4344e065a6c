use ::std::sync::Once;

static LOGGER_ONCE: Once = Once::new();

/// Send log output to the captured test stderr.
pub fn init_logging() {
    LOGGER_ONCE.call_once(|| {
        ::env_logger::Builder::new()
            .is_test(true)
            .filter_level(::log::LevelFilter::Debug)
            .init();
    });
}
