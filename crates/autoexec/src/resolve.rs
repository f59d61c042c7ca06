//! Type resolution: pick one effective type per parameter.
//!
//! Sources are tried in a fixed order and the first one present wins; a
//! later source is never consulted once an earlier one commits:
//!
//! 1. the annotation,
//! 2. the runtime type of a non-null default,
//! 3. the type text of the parameter's docstring entry.
//!
//! A parameter whose default is `null` and which has no annotation therefore
//! needs a documented type.

use crate::error::TypeResolutionError;
use crate::function::ParameterSpec;
use crate::types::{display_value, ArgType};
use docscrape::Parameter as DocRecord;

/// Which source decided the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSource {
    Annotation,
    Default,
    Docstring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub ty: ArgType,
    pub source: TypeSource,
}

pub fn resolve(
    param: &ParameterSpec,
    doc: Option<&DocRecord>,
) -> Result<ResolvedType, TypeResolutionError> {
    if let Some(ty) = param.annotation() {
        return Ok(ResolvedType {
            ty: ty.clone(),
            source: TypeSource::Annotation,
        });
    }

    if let Some(default) = param.default_value().filter(|v| !v.is_null()) {
        let ty = ArgType::of_value(default).ok_or_else(|| TypeResolutionError::UnsupportedDefault {
            param: param.name().to_string(),
            default: display_value(default),
        })?;
        return Ok(ResolvedType {
            ty,
            source: TypeSource::Default,
        });
    }

    if let Some(type_text) = doc.map(|d| d.type_text.as_str()).filter(|t| !t.is_empty()) {
        // "int, optional" → "int"
        let type_name = type_text.split(',').next().unwrap_or(type_text).trim();
        if !type_name.is_empty() {
            let ty = ArgType::from_name(type_name).ok_or_else(|| {
                TypeResolutionError::UnknownTypeName {
                    param: param.name().to_string(),
                    type_name: type_name.to_string(),
                }
            })?;
            return Ok(ResolvedType {
                ty,
                source: TypeSource::Docstring,
            });
        }
    }

    Err(TypeResolutionError::Unresolved {
        param: param.name().to_string(),
    })
}
