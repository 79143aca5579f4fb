use crate::model::signature::{SignatureAlgorithm, SignatureParameters};
use crate::model::worker::{
    ConformanceLevel, SignatureFormat, SignaturePackaging, WorkerCapabilities,
};

/// Single predicate over the declared capabilities of a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCriterion {
    SignatureQualifier(String),
    SignatureFormat(SignatureFormat),
    ConformanceLevel(ConformanceLevel),
    SignatureAlgorithm(SignatureAlgorithm),
    Packaging(SignaturePackaging),
    ValidationInfo,
}

impl CapabilityCriterion {
    pub fn is_satisfied_by(&self, capabilities: &WorkerCapabilities) -> bool {
        match self {
            Self::SignatureQualifier(qualifier) => {
                capabilities.signature_qualifiers.contains(qualifier)
            }
            Self::SignatureFormat(format) => capabilities.signature_format == *format,
            Self::ConformanceLevel(level) => capabilities.conformance_level == *level,
            Self::SignatureAlgorithm(algorithm) => {
                capabilities.signature_algorithms.contains(algorithm)
            }
            Self::Packaging(packaging) => capabilities.packaging == *packaging,
            Self::ValidationInfo => capabilities.validation_info,
        }
    }
}

/// Conjunction of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRequirement {
    criteria: Vec<CapabilityCriterion>,
}

impl CapabilityRequirement {
    pub fn new(criteria: Vec<CapabilityCriterion>) -> Self {
        Self { criteria }
    }

    pub fn from_parameters(parameters: &SignatureParameters) -> Self {
        let mut criteria = vec![
            CapabilityCriterion::SignatureQualifier(parameters.signature_qualifier.to_owned()),
            CapabilityCriterion::SignatureFormat(parameters.signature_format),
            CapabilityCriterion::ConformanceLevel(parameters.conformance_level),
            CapabilityCriterion::SignatureAlgorithm(parameters.signature_algorithm),
            CapabilityCriterion::Packaging(parameters.packaging),
        ];
        // a worker with validation info support still serves plain requests
        if parameters.with_validation_info {
            criteria.push(CapabilityCriterion::ValidationInfo);
        }
        Self { criteria }
    }

    pub fn criteria(&self) -> &[CapabilityCriterion] {
        &self.criteria
    }

    pub fn is_satisfied_by(&self, capabilities: &WorkerCapabilities) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.is_satisfied_by(capabilities))
    }
}
