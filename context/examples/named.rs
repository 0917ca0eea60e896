use std::sync::Arc;
use tessera_context::{resolve, ServiceContext};

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() -> tessera_context::Result<()> {
  let ctx = ServiceContext::new();
  ctx.subscribe(|event| println!("[context] {} {}", event.key, event.kind));

  // Register both implementations with unique names.
  ctx.set_singleton_trait_with_name::<dyn MessageSender>("email", |_| Arc::new(EmailSender))?;
  ctx.set_singleton_trait_with_name::<dyn MessageSender>("sms", |_| Arc::new(SmsSender))?;

  // Pick the implementation at the point of resolution.
  let email_notifier = resolve!(ctx, trait MessageSender, "email");
  let sms_notifier = resolve!(ctx, trait MessageSender, "sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Tessera!");
  let result2 = sms_notifier.send("+123456789", "Hello from Tessera!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
  Ok(())
}
