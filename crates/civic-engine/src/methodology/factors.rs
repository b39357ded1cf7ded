use serde::Serialize;

use super::domain::FactorId;

/// One political-economy scoring dimension and what its extremes mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub low_description: &'static str,
    pub high_description: &'static str,
}

/// Requested factor id is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown factor '{0}'")]
pub struct FactorNotFound(pub String);

/// Immutable catalogue of scoring dimensions in declaration order.
#[derive(Debug, Clone)]
pub struct FactorRegistry {
    factors: Vec<FactorDefinition>,
}

impl FactorRegistry {
    pub fn standard() -> Self {
        Self {
            factors: standard_factor_definitions(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_definitions(factors: Vec<FactorDefinition>) -> Self {
        Self { factors }
    }

    pub fn get(&self, id: &str) -> Result<&FactorDefinition, FactorNotFound> {
        self.factors
            .iter()
            .find(|factor| factor.id == id)
            .ok_or_else(|| FactorNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &FactorId) -> bool {
        self.factors.iter().any(|factor| factor.id == id.as_str())
    }

    pub fn list(&self) -> &[FactorDefinition] {
        &self.factors
    }

    pub fn ids(&self) -> impl Iterator<Item = FactorId> + '_ {
        self.factors.iter().map(|factor| FactorId::from(factor.id))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

fn standard_factor_definitions() -> Vec<FactorDefinition> {
    vec![
        FactorDefinition {
            id: "hayek",
            label: "Hayek: Dispersed Knowledge",
            low_description: "Depends on central planners knowing what only local actors can know.",
            high_description: "Uses prices, local discretion, or feedback loops that surface dispersed knowledge.",
        },
        FactorDefinition {
            id: "ostrom",
            label: "Ostrom: Commons Governance",
            low_description: "Overrides the communities that already monitor and manage the resource.",
            high_description: "Gives affected communities clear rules, monitoring, and graduated sanctions.",
        },
        FactorDefinition {
            id: "downs",
            label: "Downs: Voter Attention",
            low_description: "Too technical or invisible for rationally inattentive voters to reward or punish.",
            high_description: "Simple and salient enough that ordinary voters can judge it at the ballot box.",
        },
        FactorDefinition {
            id: "olson",
            label: "Olson: Collective Action",
            low_description: "Concentrated interests can easily organise to block or hollow it out.",
            high_description: "Diffuse beneficiaries are mobilised, or concentrated opponents are weak.",
        },
        FactorDefinition {
            id: "buchanan",
            label: "Buchanan: Public Choice",
            low_description: "Relies on officials acting against their own career and budget incentives.",
            high_description: "Aligns the self-interest of officials and legislators with the policy goal.",
        },
        FactorDefinition {
            id: "coase",
            label: "Coase: Transaction Costs",
            low_description: "Imposes heavy bargaining, compliance, or enforcement costs on every party.",
            high_description: "Assigns clear rights so parties can resolve conflicts cheaply.",
        },
        FactorDefinition {
            id: "stigler",
            label: "Stigler: Regulatory Capture",
            low_description: "Creates a regulator the regulated industry can readily capture.",
            high_description: "Leaves little discretion for the regulated to bend in their favour.",
        },
        FactorDefinition {
            id: "tullock",
            label: "Tullock: Rent Seeking",
            low_description: "Creates valuable privileges that invite lobbying and wasteful competition.",
            high_description: "Removes or auctions away privileges worth lobbying for.",
        },
        FactorDefinition {
            id: "niskanen",
            label: "Niskanen: Bureaucratic Incentives",
            low_description: "Rewards agencies for growing budgets rather than delivering results.",
            high_description: "Keeps administration lean with measurable outputs and sunset review.",
        },
        FactorDefinition {
            id: "arrow",
            label: "Arrow: Preference Aggregation",
            low_description: "Outcome hinges on agenda control or cycling majorities.",
            high_description: "Produces stable outcomes that reflect broadly shared preferences.",
        },
        FactorDefinition {
            id: "hirschman",
            label: "Hirschman: Exit and Voice",
            low_description: "Removes both the option to leave and meaningful channels to complain.",
            high_description: "Preserves exit options and strengthens voice for those affected.",
        },
        FactorDefinition {
            id: "north",
            label: "North: Institutional Durability",
            low_description: "Easily reversed by the next majority and unlikely to shape lasting norms.",
            high_description: "Builds durable institutions and expectations that outlast election cycles.",
        },
        FactorDefinition {
            id: "sen",
            label: "Sen: Capabilities",
            low_description: "Leaves the real freedoms of the least advantaged unchanged or worse.",
            high_description: "Expands what people, especially the least advantaged, are able to do and be.",
        },
    ]
}
