/// Wrap an `async fn(ctx) -> Result<(), Error>` into the boxed-future fn
/// pointer the handler records store.
#[macro_export]
macro_rules! handler_func {
    ($func:expr $(,)?) => {
        |ctx| Box::pin($func(ctx))
    };
}
