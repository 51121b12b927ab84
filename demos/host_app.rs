//! Example: a host application receiving session events on the delivery thread
use std::sync::Arc;
use std::thread;

use courier_events::{
    CallbackQueue, CallbackRegistry, ChatMessage, ConnectionState, Context, Event, EventKind,
    SecretKey, UserId,
};

fn main() {
    env_logger::init();

    let queue = Arc::new(CallbackQueue::new().expect("spawn delivery thread"));
    let registry = CallbackRegistry::new(&queue);
    let context = Arc::new(Context::new("demo-session"));

    registry.register(
        EventKind::ConnectionStateChanged,
        Arc::new(|context: &Context, event: &Event| {
            if let Event::ConnectionStateChanged(state) = event {
                println!("[{}] connection: {state:?}", context.session());
            }
        }),
    );
    registry.register(
        EventKind::MessageReceived,
        Arc::new(|context: &Context, event: &Event| {
            if let Event::MessageReceived(message) = event {
                println!("[{}] {}: {}", context.session(), message.from, message.body);
            }
        }),
    );
    registry.register(
        EventKind::IdentityCreated,
        Arc::new(|context: &Context, event: &Event| {
            if let Event::IdentityCreated(key) = event {
                println!(
                    "[{}] identity created ({} key bytes)",
                    context.session(),
                    key.as_bytes().len()
                );
            }
        }),
    );

    // Simulate library internals reporting from their own threads.
    let network = {
        let registry = registry.clone();
        let context = Arc::clone(&context);
        thread::spawn(move || {
            registry
                .emit(
                    &context,
                    Event::ConnectionStateChanged(ConnectionState::Connecting),
                )
                .unwrap();
            registry
                .emit(
                    &context,
                    Event::ConnectionStateChanged(ConnectionState::Connected),
                )
                .unwrap();
        })
    };
    let protocol = {
        let registry = registry.clone();
        let context = Arc::clone(&context);
        thread::spawn(move || {
            registry
                .emit(&context, Event::IdentityCreated(SecretKey::new(vec![0x42; 32])))
                .unwrap();
            for body in ["hello", "still there?"] {
                registry
                    .emit(
                        &context,
                        Event::MessageReceived(ChatMessage {
                            from: UserId::new("alice"),
                            body: body.into(),
                        }),
                    )
                    .unwrap();
            }
        })
    };

    network.join().unwrap();
    protocol.join().unwrap();

    drop(registry);
    drop(queue); // flushes every staged notification before returning
}
