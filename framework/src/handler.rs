pub mod command_handler;
pub mod component_handler;
pub mod modal_handler;

pub trait InteractionHandler<T> {
    fn key(&self) -> T;
}
