use crate::domain::availability::DomainResult;

/// Summary of earlier availability results for the system prompt.
pub fn build_domain_context(last_results: &[DomainResult]) -> String {
    if last_results.is_empty() {
        return String::new();
    }

    let (available, unavailable): (Vec<&DomainResult>, Vec<&DomainResult>) =
        last_results.iter().partition(|result| result.available);

    let mut context = String::from("\nPrevious domain results:\n");
    if !available.is_empty() {
        context.push_str(&format!("Available domains: {}\n", join_names(&available)));
    }
    if !unavailable.is_empty() {
        context.push_str(&format!("Unavailable domains: {}\n", join_names(&unavailable)));
    }

    context
}

fn join_names(results: &[&DomainResult]) -> String {
    results
        .iter()
        .map(|result| result.domain.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
