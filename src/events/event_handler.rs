/// Implemented by read models that fold a stream of events.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
