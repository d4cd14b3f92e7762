use graphwire::core::engine::PathCost;
use graphwire::server::protocol::{self, Request};

#[test]
fn test_every_command_in_the_catalog_parses() {
    let table: Vec<(&str, Request)> = vec![
        ("ADD NODE node-1", Request::AddNode("node-1".to_string())),
        (
            "ADD EDGE node-1 node_2 0",
            Request::AddEdge {
                from: "node-1".to_string(),
                to: "node_2".to_string(),
                weight: 0,
            },
        ),
        ("REMOVE NODE node-1", Request::RemoveNode("node-1".to_string())),
        (
            "REMOVE EDGE a b",
            Request::RemoveEdge {
                from: "a".to_string(),
                to: "b".to_string(),
            },
        ),
        (
            "SHORTEST PATH a b",
            Request::ShortestPath {
                from: "a".to_string(),
                to: "b".to_string(),
            },
        ),
        (
            "CLOSER THAN 2147483647 a",
            Request::CloserThan {
                weight: 2147483647,
                to: "a".to_string(),
            },
        ),
        ("BYE MATE!", Request::Bye),
    ];
    for (line, expected) in table {
        assert_eq!(Request::parse(line), Some(expected), "line: {:?}", line);
    }
}

#[test]
fn test_anchoring_rejects_trailing_and_leading_noise() {
    for line in [
        "ADD NODE a ",
        "ADD NODE  a",
        " SHORTEST PATH a b",
        "SHORTEST PATH a b c",
        "CLOSER THAN x a",
        "CLOSER THAN 5.0 a",
        "REMOVE EDGE a",
        "BYE MATE! ",
        "HI, I AM 11111111-2222-3333-4444-555555555555 please",
    ] {
        assert_eq!(Request::parse(line), None, "line: {:?}", line);
    }
}

#[test]
fn test_greeting_requires_uuid_shape() {
    assert_eq!(
        protocol::parse_greeting("HI, I AM deadbeef-dead-beef-dead-beefdeadbeef"),
        Some("deadbeef-dead-beef-dead-beefdeadbeef")
    );
    for line in [
        "HI, I AM",
        "HI, I AM bob",
        "HI, I AM 11111111-2222-3333-4444-55555555555",
        "HI, I AM 11111111-2222-3333-4444-5555555555555",
        "HI I AM 11111111-2222-3333-4444-555555555555",
    ] {
        assert_eq!(protocol::parse_greeting(line), None, "line: {:?}", line);
    }
}

#[test]
fn test_response_lines_match_the_catalog() {
    assert_eq!(protocol::NODE_ADDED, "NODE ADDED");
    assert_eq!(protocol::NODE_ALREADY_EXISTS, "ERROR: NODE ALREADY EXISTS");
    assert_eq!(protocol::NODE_REMOVED, "NODE REMOVED");
    assert_eq!(protocol::EDGE_ADDED, "EDGE ADDED");
    assert_eq!(protocol::EDGE_REMOVED, "EDGE REMOVED");
    assert_eq!(protocol::NODE_NOT_FOUND, "ERROR: NODE NOT FOUND");
    assert_eq!(
        protocol::NOT_UNDERSTOOD,
        "SORRY, I DID NOT UNDERSTAND THAT"
    );
    assert_eq!(
        protocol::server_greeting("5c17ba97-25fa-4b65-8799-3b18a2f4a638"),
        "HI, I AM 5c17ba97-25fa-4b65-8799-3b18a2f4a638"
    );
    assert_eq!(protocol::greeting_reply("abc"), "HI abc");
    assert_eq!(
        protocol::farewell("abc", 1234),
        "BYE abc, WE SPOKE FOR 1234 MS"
    );
}

#[test]
fn test_unreachable_token_is_i32_max() {
    assert_eq!(protocol::path_cost(PathCost::Unreachable), "2147483647");
    assert_eq!(protocol::UNREACHABLE, i32::MAX.to_string());
}

#[test]
fn test_name_list_rendering() {
    assert_eq!(
        protocol::name_list(&["x".to_string(), "y".to_string(), "z".to_string()]),
        "x,y,z"
    );
    assert_eq!(protocol::name_list(&["only".to_string()]), "only");
    assert_eq!(protocol::name_list(&[]), "");
}
