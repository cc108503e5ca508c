#![warn(clippy::all)]
//! Fluent construction of IAM policy statements.
//!
//! A [PolicyStatement] collects actions, resources, principals and conditions through chained calls and renders
//! them as a [Statement]. Per-service catalogues ([Service]) supply action access levels and resource ARN templates;
//! the [service_statement] macro turns a catalogue into a typed binding.

pub(crate) mod accumulator;
pub(crate) mod arn;
pub(crate) mod builder;
pub(crate) mod catalog;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod service;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    accumulator::Accumulator,
    arn::{placeholders, resolve, ArnDefaults, ArnFields},
    builder::PolicyStatement,
    catalog::{
        AccessLevel, ActionDescriptor, ActionDescriptorBuilder, ActionDescriptorBuilderError, ResourceTypeDescriptor,
        ResourceTypeDescriptorBuilder, ResourceTypeDescriptorBuilderError, ResourceTypeRef, Service, ServiceBuilder,
        ServiceBuilderError,
    },
    condition::{
        op as condop, Condition, ConditionMap, ConditionOp, ConditionSet, ConditionValues, Operator, DEFAULT_OPERATOR,
    },
    effect::Effect,
    error::StatementError,
    policy::{PolicyDocument, PolicyDocumentBuilder, PolicyDocumentBuilderError, PolicyVersion},
    principal::{
        Principal, PrincipalKind, PrincipalSet, SpecifiedPrincipal, SpecifiedPrincipalBuilder,
        SpecifiedPrincipalBuilderError,
    },
    serutil::StringList,
    statement::{Statement, StatementBuilder, StatementBuilderError},
};
