//! Sample capability: user-facing greetings.

use std::sync::Arc;

use extensa_core::{EmbeddedLocator, ImplementationCatalog};
use extensa_protocols::{capability, EXTENSION_DIRECTORY};

/// Configuration shipped with the binary.
const BUNDLED_CONFIG: &str = include_str!("../resources/META-INF/extensa/com.example.UserService");

pub trait UserService: Send + Sync {
    fn hello(&self, name: &str) -> String;
}

capability! {
    /// Capability marker for [`UserService`].
    pub struct UserServiceCapability: dyn UserService;
    name = "com.example.UserService",
    default = "student",
}

#[derive(Debug, Default)]
pub struct TeacherUserService;

impl UserService for TeacherUserService {
    fn hello(&self, name: &str) -> String {
        format!("Teacher says hello to {}", name)
    }
}

#[derive(Debug, Default)]
pub struct StudentUserService;

impl UserService for StudentUserService {
    fn hello(&self, name: &str) -> String {
        format!("Student says hello to {}", name)
    }
}

/// Register the sample implementations.
pub fn register(catalog: &mut ImplementationCatalog) {
    catalog
        .register_default::<TeacherUserService>("com.example.TeacherUserService")
        .provides::<UserServiceCapability>(|it| it as Arc<dyn UserService>);
    catalog
        .register_default::<StudentUserService>("com.example.StudentUserService")
        .provides::<UserServiceCapability>(|it| it as Arc<dyn UserService>);
}

/// The bundled configuration as an embedded resource.
pub fn bundled_resources() -> EmbeddedLocator {
    EmbeddedLocator::new().with_resource(
        format!("{}com.example.UserService", EXTENSION_DIRECTORY),
        BUNDLED_CONFIG,
    )
}
