use url::Url;

const TICKET_PATH: &str = "/a/tickets/";

/// True for ticket detail pages: a path containing `/a/tickets/<digits>`.
pub fn is_ticket_page(location: &str) -> bool {
    let Ok(url) = Url::parse(location) else {
        return false;
    };
    let path = url.path();
    path.match_indices(TICKET_PATH).any(|(index, _)| {
        path[index + TICKET_PATH.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::is_ticket_page;

    #[test]
    fn ticket_detail_paths_qualify() {
        assert!(is_ticket_page("https://acme.freshdesk.com/a/tickets/1234"));
        assert!(is_ticket_page(
            "https://acme.freshdesk.com/a/tickets/1234/edit?tab=notes"
        ));
    }

    #[test]
    fn other_paths_do_not_qualify() {
        assert!(!is_ticket_page("https://acme.freshdesk.com/a/tickets/filters/all"));
        assert!(!is_ticket_page("https://acme.freshdesk.com/a/dashboard"));
        assert!(!is_ticket_page("https://acme.freshdesk.com/?next=/a/tickets/12"));
        assert!(!is_ticket_page("/a/tickets/12"));
    }
}
