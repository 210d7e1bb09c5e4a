pub mod error;
mod lines;
mod resolver;
mod rules;

pub use lines::check_proof;
pub use resolver::{ModuleResolver, ReferenceResolver};

use crate::{ast::*, Error, ModusResult};
use ahash::AHashMap;
use error::{ProofError, ProofErrorKind, ProofErrorList};
use indexmap::IndexSet;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct Config {
    strict: bool,
    require_proved_quantifier_premise: bool,
    disallowed_rules: IndexSet<RuleKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            require_proved_quantifier_premise: true,
            disallowed_rules: IndexSet::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode, the rename rule also requires the replacement variable not to occur in the
    /// referenced formula.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Whether the universal and existential rules require their premise line to be proved.
    pub fn require_proved_quantifier_premise(mut self, value: bool) -> Self {
        self.require_proved_quantifier_premise = value;
        self
    }

    /// Makes every line justified by `rule` fail with a "reason not allowed" error.
    pub fn disallow_rule(mut self, rule: RuleKind) -> Self {
        self.disallowed_rules.insert(rule);
        self
    }

    pub fn is_allowed(&self, rule: RuleKind) -> bool {
        !self.disallowed_rules.contains(&rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropositionOutcome {
    /// Every formal proof of the proposition was accepted.
    Proved,

    /// The proposition has no formal proof.
    Unproved,

    /// Some formal proof of the proposition, or the proposition itself, has errors.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropositionReport {
    pub label: String,
    pub outcome: PropositionOutcome,
}

/// The result of checking a whole module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleReport {
    pub propositions: Vec<PropositionReport>,
    pub errors: ProofErrorList,
}

impl ModuleReport {
    /// Returns `true` if no errors were found. Unproved propositions don't make a module invalid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn count(&self, outcome: PropositionOutcome) -> usize {
        self.propositions.iter().filter(|p| p.outcome == outcome).count()
    }
}

/// Checks the nodes of a module in order. Axioms and proved propositions become available to the
/// nodes after them, and definitions are unfolded in every formula after them.
pub struct ModuleChecker<'c> {
    config: Config,
    resolver: ModuleResolver,
    interrupt: Option<&'c AtomicBool>,
}

impl<'c> ModuleChecker<'c> {
    pub fn new(config: Config) -> Self {
        ModuleChecker {
            config,
            resolver: ModuleResolver::new(),
            interrupt: None,
        }
    }

    /// Makes the checker stop with `Error::Interrupted` before the next proposition once `flag`
    /// is set.
    pub fn interruptible(mut self, flag: &'c AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn check(&mut self, module: &Module) -> ModusResult<ModuleReport> {
        let mut report = ModuleReport::default();
        let mut labels: AHashMap<&str, ModuleContext> = AHashMap::new();
        let nodes_context = ModuleContext::new(&module.address).at("getNodeList()");

        for (k, node) in module.nodes.iter().enumerate() {
            let node_context = nodes_context.at_index(k);
            let label = node.label();
            if let Some(first) = labels.get(label) {
                let e = ProofError::new(
                    ProofErrorKind::NodeLabelAlreadyExists,
                    node_context.at(".getLabel()"),
                )
                .with_message(format!("'{}'", label))
                .with_reference(first.at(".getLabel()"));
                report.errors.push(e);
            } else {
                labels.insert(label, node_context.clone());
            }

            match node {
                Node::Axiom(a) => self.resolver.add_fact(&a.label, &a.formula),
                Node::PredicateDefinition(d) => {
                    let context = node_context.at(node.accessor());
                    report.errors.extend(self.add_definition(operators::PREDCON, d, context));
                }
                Node::FunctionDefinition(d) => {
                    let context = node_context.at(node.accessor());
                    report.errors.extend(self.add_definition(operators::FUNCON, d, context));
                }
                Node::Proposition(p) => {
                    if self.interrupt.is_some_and(|flag| flag.load(Ordering::Acquire)) {
                        return Err(Error::Interrupted);
                    }
                    let context = node_context.at(node.accessor());
                    let (outcome, errors) = self.check_proposition(p, &context);
                    match outcome {
                        PropositionOutcome::Proved => {
                            log::debug!("proposition '{}' is proved", p.label);
                            self.resolver.add_fact(&p.label, &p.formula);
                        }
                        PropositionOutcome::Unproved => {
                            log::warn!("proposition '{}' has no formal proof", p.label);
                        }
                        PropositionOutcome::Invalid => {
                            log::debug!("proposition '{}' has {} errors", p.label, errors.len());
                        }
                    }
                    report.errors.append(errors);
                    report.propositions.push(PropositionReport {
                        label: p.label.clone(),
                        outcome,
                    });
                }
            }
        }

        log::info!(
            "module '{}': {} propositions proved, {} unproved, {} invalid, {} errors",
            module.address,
            report.count(PropositionOutcome::Proved),
            report.count(PropositionOutcome::Unproved),
            report.count(PropositionOutcome::Invalid),
            report.errors.len(),
        );
        Ok(report)
    }

    fn add_definition(
        &mut self,
        operator: &str,
        definition: &Definition,
        context: ModuleContext,
    ) -> Option<ProofError> {
        let message = self.resolver.add_definition(operator, definition).err()?;
        log::debug!("definition '{}' is malformed: {}", definition.label, message);
        Some(ProofError::new(ProofErrorKind::DefinitionIsMalformed, context).with_message(message))
    }

    fn check_proposition(
        &self,
        proposition: &Proposition,
        context: &ModuleContext,
    ) -> (PropositionOutcome, ProofErrorList) {
        if proposition.proofs.is_empty() {
            return (PropositionOutcome::Unproved, ProofErrorList::new());
        }

        let mut errors = ProofErrorList::new();
        let proofs_context = context.at(".getFormalProofList()");
        for (p, proof) in proposition.proofs.iter().enumerate() {
            let lines_context = proofs_context.at_index(p).at(".getFormalProofLineList()");
            if proof.lines.is_empty() {
                errors.push(ProofError::new(ProofErrorKind::MissingProofLines, lines_context));
                continue;
            }
            errors.append(check_proof(
                &self.config,
                Some(&proposition.formula),
                &proof.lines,
                &lines_context,
                &self.resolver,
            ));
        }

        if errors.is_empty() {
            (PropositionOutcome::Proved, errors)
        } else {
            (PropositionOutcome::Invalid, errors)
        }
    }
}
