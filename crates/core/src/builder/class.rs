use super::Poison;
use super::member::{FieldInfoBuilder, MethodInfoBuilder};
use crate::annotation::AnnotationSet;
use crate::config::ExtractConfig;
use crate::descriptor;
use crate::error::{BuildError, Result};
use crate::model::ClassInfo;
use crate::repo::{ClassInfoRepo, ClassRef};
use crate::visitor::{
    AnnotationVisitor, ClassHeader, ClassVisitor, FieldDecl, FieldVisitor, MethodDecl,
    MethodVisitor,
};
use classmeta_api::{split_qualified_name, to_qualified_name};
use std::sync::Arc;

/// Identity and header data, present once the header event has arrived.
#[derive(Debug)]
struct Identity {
    header: ClassHeader,
    qualified_name: String,
    package_name: String,
    nested_name: String,
    slot: ClassRef,
}

/// Builds one [`ClassInfo`] from its event stream.
///
/// Events must arrive in class-file order: the header first, then
/// annotations, fields and methods. [`ClassInfoBuilder::finish`] freezes the
/// result and publishes it to the repository. The first rejected event
/// poisons the builder: later events fail with [`BuildError::Aborted`] and
/// `finish` publishes nothing.
#[derive(Debug)]
pub struct ClassInfoBuilder {
    repo: ClassInfoRepo,
    config: ExtractConfig,
    identity: Option<Identity>,
    fields: Vec<FieldInfoBuilder>,
    methods: Vec<MethodInfoBuilder>,
    constructors: Vec<usize>,
    annotations: AnnotationSet,
    poison: Poison,
}

impl ClassInfoBuilder {
    pub fn new(repo: ClassInfoRepo) -> Self {
        Self::with_config(repo, ExtractConfig::default())
    }

    pub fn with_config(repo: ClassInfoRepo, config: ExtractConfig) -> Self {
        Self {
            repo,
            config,
            identity: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            annotations: AnnotationSet::default(),
            poison: Poison::default(),
        }
    }

    /// Internal name of the class, once the header has been seen.
    pub fn id_name(&self) -> Option<&str> {
        self.identity.as_ref().map(|id| id.header.name.as_str())
    }

    /// Cause of the first rejected event, if any.
    pub fn failure(&self) -> Option<&str> {
        self.poison.cause()
    }

    fn owner_name(&self, event: &'static str) -> Result<String> {
        self.identity
            .as_ref()
            .map(|id| id.header.name.clone())
            .ok_or(BuildError::MissingHeader { event })
    }

    pub fn finish(self) -> Result<Arc<ClassInfo>> {
        self.poison.check()?;
        let identity = self
            .identity
            .ok_or(BuildError::MissingHeader { event: "finish" })?;

        let fields = self
            .fields
            .into_iter()
            .map(|f| f.build().map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        let methods = self
            .methods
            .into_iter()
            .map(|m| m.build().map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        let constructors = self
            .constructors
            .iter()
            .map(|&i| Arc::clone(&methods[i]))
            .collect();

        let header = identity.header;
        let info = Arc::new(ClassInfo {
            id_name: header.name,
            qualified_name: identity.qualified_name,
            package_name: identity.package_name,
            nested_name: identity.nested_name,
            access: header.access,
            signature: header.signature,
            super_name: header.super_name,
            interfaces: header.interfaces,
            fields,
            methods,
            constructors,
            annotations: self.annotations.freeze(),
        });

        identity.slot.publish(Arc::clone(&info))?;
        tracing::debug!(
            "Built {} ({} fields, {} methods, {} constructors)",
            info.qualified_name(),
            info.declared_fields().len(),
            info.declared_methods().len(),
            info.constructors().len()
        );
        Ok(info)
    }
}

impl ClassInfoBuilder {
    fn identify(&self, header: ClassHeader) -> Result<Identity> {
        if let Some(existing) = &self.identity {
            return Err(BuildError::DuplicateHeader {
                first: existing.header.name.clone(),
                second: header.name,
            });
        }

        let qualified_name = to_qualified_name(&header.name);
        let split = split_qualified_name(&qualified_name)
            .map(|(package, nested)| (package.to_string(), nested.to_string()));
        let (package_name, nested_name) = match split {
            Some(parts) => parts,
            None if self.config.require_package => {
                return Err(BuildError::MissingPackage(qualified_name));
            }
            None => (String::new(), qualified_name.clone()),
        };

        tracing::debug!("Visiting class {} (access {})", qualified_name, header.access);
        let slot = self.repo.get_or_create(&header.name);
        Ok(Identity {
            header,
            qualified_name,
            package_name,
            nested_name,
            slot,
        })
    }
}

impl ClassVisitor for ClassInfoBuilder {
    fn visit(&mut self, header: ClassHeader) -> Result<()> {
        self.poison.check()?;
        let identity = self.identify(header).map_err(|e| self.poison.record(e))?;
        self.identity = Some(identity);
        Ok(())
    }

    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> Result<&mut dyn AnnotationVisitor> {
        self.poison.check()?;
        let type_name = self
            .owner_name("annotation")
            .and_then(|_| descriptor::field_type_name(descriptor))
            .map_err(|e| self.poison.record(e))?;
        Ok(self.annotations.begin(type_name, visible))
    }

    fn visit_field(&mut self, decl: FieldDecl) -> Result<&mut dyn FieldVisitor> {
        self.poison.check()?;
        let owner = self
            .owner_name("field")
            .map_err(|e| self.poison.record(e))?;
        tracing::trace!("field {}.{} {}", owner, decl.name, decl.descriptor);
        let index = self.fields.len();
        self.fields.push(FieldInfoBuilder::new(owner, decl));
        Ok(&mut self.fields[index])
    }

    fn visit_method(&mut self, decl: MethodDecl) -> Result<&mut dyn MethodVisitor> {
        self.poison.check()?;
        let owner = self
            .owner_name("method")
            .map_err(|e| self.poison.record(e))?;
        tracing::trace!("method {}.{}{}", owner, decl.name, decl.descriptor);
        let index = self.methods.len();
        let builder = MethodInfoBuilder::new(owner, decl);
        if builder.is_constructor() {
            self.constructors.push(index);
        }
        self.methods.push(builder);
        Ok(&mut self.methods[index])
    }
}
