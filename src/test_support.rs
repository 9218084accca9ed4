//! In-memory host used by the unit tests.

use crate::ast::{AnnotationNode, ClassNode, CompilationUnit, Host, MemberValue};
use crate::registry::ClassInjector;
use std::collections::HashMap;

pub struct TestHost;

impl Host for TestHost {
    type Annotation = TestAnnotation;
    type Class = TestClass;
    type Unit = TestUnit;
}

#[derive(Debug, Clone)]
pub struct TestAnnotation {
    pub type_name: String,
    pub members: HashMap<String, MemberValue>,
}

impl TestAnnotation {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            members: HashMap::new(),
        }
    }

    /// `@Artefact("<value>")`
    pub fn artefact(value: &str) -> Self {
        Self::new("Artefact").with_member("value", MemberValue::Literal(value.to_string()))
    }

    pub fn with_member(mut self, name: &str, value: MemberValue) -> Self {
        self.members.insert(name.to_string(), value);
        self
    }
}

impl AnnotationNode for TestAnnotation {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn member(&self, name: &str) -> Option<MemberValue> {
        self.members.get(name).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestClass {
    pub name: String,
    pub interface: bool,
    /// Labels appended by injectors, in call order.
    pub injected: Vec<String>,
}

impl TestClass {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn interface(name: &str) -> Self {
        Self {
            interface: true,
            ..Self::new(name)
        }
    }
}

impl ClassNode for TestClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interface(&self) -> bool {
        self.interface
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestUnit {
    pub name: String,
    pub touched: usize,
}

impl TestUnit {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            touched: 0,
        }
    }
}

impl CompilationUnit for TestUnit {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Appends its label to the class it is applied to.
pub struct Recorder(pub &'static str);

impl ClassInjector<TestHost> for Recorder {
    fn inject(&self, unit: &mut TestUnit, class: &mut TestClass) -> anyhow::Result<()> {
        unit.touched += 1;
        class.injected.push(self.0.to_string());
        Ok(())
    }
}

/// Always fails with the given message.
pub struct Failing(pub &'static str);

impl ClassInjector<TestHost> for Failing {
    fn inject(&self, _unit: &mut TestUnit, _class: &mut TestClass) -> anyhow::Result<()> {
        anyhow::bail!("{}", self.0)
    }
}

pub struct Noop;

impl ClassInjector<TestHost> for Noop {
    fn inject(&self, _unit: &mut TestUnit, _class: &mut TestClass) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn noop() -> Noop {
    Noop
}
