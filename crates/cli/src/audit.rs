//! The Impact3 AI & automation audit deck.

use deck_core::{Deck, DeckMetadata};

/// File name used when no output path is given.
pub const DEFAULT_FILE_NAME: &str = "Impact3_AI_Audit_Presentation.pptx";

/// Number of slides the audit deck always contains.
pub const SLIDE_COUNT: usize = 28;

/// Assemble the full audit deck.
pub fn build_deck() -> Deck {
    let mut deck = Deck::new(
        DeckMetadata::new("Impact3 AI & Automation Audit")
            .with_author("Reprise AI")
            .with_subject("Discovery Findings & Strategic Recommendations"),
    );

    // Introduction
    deck.add_title_slide(
        "Impact3 AI & Automation Audit",
        "Discovery Findings & Strategic Recommendations\n\nPrepared by Reprise AI | January 2026",
    );

    deck.add_content_slide(
        "Agenda",
        [
            "Executive Summary",
            "Your Team's Voice - Interview Insights",
            "Pain Points Matrix",
            "Automation Opportunities",
            "Recommended Solutions",
            "Implementation Roadmap",
            "ROI Projections",
            "Next Steps",
        ],
    );

    deck.add_content_slide(
        "Executive Summary",
        [
            "## Goal",
            "Scale from $3M to $6M ARR without doubling headcount (40 → 60 people)",
            "",
            "## Interviews Completed: 10/10 departments",
            "",
            "## Key Finding",
            "Communication overhead and manual data workflows are the primary scaling blockers",
            "",
            "## Opportunity",
            "70%+ efficiency gains possible in critical areas",
            "",
            "## Recommendation",
            "Phased automation rollout starting with Discord intelligence and report automation",
        ],
    );

    deck.add_content_slide(
        "Your Company at a Glance",
        [
            "## Current State",
            "ARR: $3M | Team Size: 40 | Manual Hours/Week: 20-40",
            "",
            "## Target State",
            "ARR: $6M | Team Size: 60 (with efficiency) | Manual Hours: 50% reduction",
            "",
            "## Services",
            "Social Media, Content, PR, Paid Growth for Web3/Crypto clients",
            "",
            "## Tools in Use",
            "Notion, Discord, n8n, Typefully, Figma, Toggle",
            "",
            "## Existing Automation",
            "Zapier + n8n (scoreboards, analytics → Google Sheets)",
        ],
    );

    deck.add_content_slide(
        "Interview Coverage - 10 Departments",
        [
            "Raul (CEO) - Scaling, Discord overload",
            "Jeff (CSO) - Multi-platform coordination",
            "Matt (Social Media) - Content discovery, research",
            "Leah (Copywriting) - Asset findability",
            "Jess (Visual Production) - Incomplete briefs",
            "Joe (Paid Growth) - Competitor analysis",
            "Kyle R (Sales/Co-Owner) - Pipeline automation",
            "Kyle H + Patrick (PR) - Placement tracking",
            "Diana + team (Account Management) - Report compilation",
            "Gonzalo (KOL) - Influencer coordination",
        ],
    );

    // Pain points
    deck.add_title_slide("Pain Points Matrix", "Critical Priority Issues");

    deck.add_content_slide(
        "CRITICAL: Discord Communication Overload",
        [
            "## Who: CEO + entire team",
            "",
            "## Scale",
            "50+ messages/day for CEO alone",
            "20 messages morning + 30-40 throughout day",
            "",
            "## Impact",
            "\"Shit ton of hours\" - CEO quote",
            "",
            "## Scaling Risk",
            "\"Adding 20-40 people, I don't know how anyone will keep up with Discord\"",
            "",
            "## Target: 70% reduction in back-and-forth",
        ],
    );

    deck.add_content_slide(
        "CRITICAL: Research Inefficiency",
        [
            "## Who: Social Media, PR, Strategy",
            "",
            "## Scale",
            "10-20 hrs/week on manual research (PR alone)",
            "",
            "## Current Tool",
            "Internal AI research tool 'not fully working'",
            "",
            "## Goal",
            "10-minute morning scroll = all client research done",
            "",
            "## CEO Quote",
            "\"What would you automate across Impact3? Research.\"",
        ],
    );

    deck.add_two_column_slide(
        "HIGH PRIORITY Pain Points",
        [
            "## Incomplete Creative Briefs",
            "Who: Visual Production (Jess)",
            "Impact: 5 min → 2+ HOURS delay",
            "Root Cause: Missing references, platforms, copy, dimensions",
            "Solution: Required field validation",
        ],
        [
            "## Manual Report Compilation",
            "Who: Account Managers (Diana)",
            "Time Cost: 2-4 hrs/week",
            "Connection: CEO's primary visibility",
            "Raul: \"If we can automate that, that's even better\"",
        ],
    );

    deck.add_two_column_slide(
        "MEDIUM PRIORITY Pain Points",
        [
            "## Reply Gang Content Discovery",
            "Who: Social Media team",
            "Challenge: Finding relevant tweets",
            "Current Tool: X Radar (no API)",
            "Matt: \"If you can scrape X Radar, that would be crazy\"",
        ],
        [
            "## Cross-Platform Fragmentation",
            "Who: All client-facing teams",
            "Issue: Slack + Telegram + Teams + Discord",
            "Impact: Context switching, missed messages",
            "Solution: Unified inbox or routing",
        ],
    );

    deck.add_content_slide(
        "Cross-Department Patterns",
        [
            "## Recurring Themes Across All 10 Interviews",
            "",
            "Discord overload → CEO, Social (100 msgs), CSO (6 platforms), KOL",
            "Research time sink → Social, PR (10-20 hrs), Paid Growth",
            "Manual reporting → AMs, PR (placement tracking), CEO visibility",
            "Notion adoption friction → Copywriting, AMs, Visual Production",
            "Tool fragmentation → All client-facing roles",
            "",
            "## Key Insight",
            "Solutions addressing Discord + Notion + Reporting have compounding impact across 8+ departments",
        ],
    );

    // Automation opportunities
    deck.add_content_slide(
        "Automation Opportunities - Tiered Approach",
        [
            "## Tier 1: Quick Wins (Week 1-2)",
            "Discord Daily Digest, Notion Forms, Task Notifications",
            "",
            "## Tier 2: Core Automation (Week 3-6)",
            "Report Automation, Research Briefs, Calendar Sync",
            "",
            "## Tier 3: Intelligence Layer (Month 2-3)",
            "MCP Servers, Reply Finder, Sentiment Analysis",
        ],
    );

    deck.add_content_slide(
        "Tier 1: Quick Wins (Week 1-2)",
        [
            "## 1. Discord Daily Digest",
            "AI summarizes key messages by channel",
            "Highlights action items and decisions",
            "Impact: 70% reduction in CEO Discord time",
            "",
            "## 2. Notion Forms with Required Fields",
            "Mandatory fields for creative briefs",
            "Impact: Eliminate 2+ hour delays on tickets",
            "",
            "## 3. Auto-Create Tasks on Assignment",
            "Personal calendar sync when assigned",
            "Impact: Reduce 'did you see my message?' pings",
        ],
    );

    deck.add_content_slide(
        "Tier 2: Core Automation (Week 3-6)",
        [
            "## 4. Automated W/M/Q Reports",
            "Pull data from content calendars",
            "AI generates performance summaries",
            "Impact: Save Diana 2-4 hrs/week, scale to all AMs",
            "",
            "## 5. Research Brief Generator",
            "Morning briefs per client niche",
            "Aggregate crypto news by topic",
            "Impact: 10-min scroll = daily research done",
            "",
            "## 6. Content Calendar Automation",
            "'Done' status → auto-sync to calendar",
        ],
    );

    deck.add_content_slide(
        "Tier 3: Intelligence Layer (Month 2-3)",
        [
            "## 7. Reply Opportunity Finder",
            "Monitor relevant conversations per client",
            "AI suggests 5 reply angles (not full replies)",
            "Impact: Solve 'biggest time sink' for social team",
            "",
            "## 8. VP Performance Feedback Loop",
            "Notify creators when content performs well",
            "Impact: Motivation + learning loop",
            "",
            "## 9. Client Communication Intelligence",
            "Sentiment analysis across Slack/Telegram/Discord",
            "Impact: Proactive client management",
        ],
    );

    // Architecture
    deck.add_content_slide(
        "Technical Architecture",
        [
            "## AI Layer",
            "Claude / GPT for intelligence",
            "",
            "## MCP Servers (Custom Built)",
            "Discord Intel | Notion Ops | Research Hub",
            "",
            "## n8n Workflow Engine",
            "Orchestration & Automation",
            "",
            "## Integrations",
            "Discord | Notion | X/Twitter APIs | Google Workspace",
        ],
    );

    deck.add_content_slide(
        "MCP Server Components",
        [
            "## 1. Discord Intelligence MCP",
            "Channel summarization, action items, priority filtering",
            "",
            "## 2. Notion Operations MCP",
            "Required field validation, stage triggers, report aggregation",
            "",
            "## 3. Research Hub MCP",
            "Multi-source news, client profile matching, trend detection",
        ],
    );

    // Roadmap
    deck.add_content_slide(
        "12-Week Implementation Roadmap",
        [
            "## Phase 1: Foundation (Weeks 1-2)",
            "Discord digest, Notion forms, n8n setup",
            "",
            "## Phase 2: Core Automation (Weeks 3-6)",
            "Report automation, research briefs, calendar sync",
            "",
            "## Phase 3: Intelligence (Weeks 7-10)",
            "MCP servers, reply finder, sentiment analysis",
            "",
            "## Phase 4: Optimization (Weeks 11-12)",
            "Training, refinement, documentation",
        ],
    );

    deck.add_content_slide(
        "Phase 1: Foundation (Weeks 1-2)",
        [
            "## Deliverables",
            "n8n instance configured",
            "Discord bot deployed",
            "Daily digest workflow live",
            "Notion forms with validation",
            "",
            "## Success Metrics",
            "CEO Discord time reduced by 50%+",
            "Zero incomplete creative briefs",
            "Team adoption > 80%",
            "",
            "## Investment: $5,000 - $8,000",
        ],
    );

    deck.add_content_slide(
        "Phase 2: Core Automation (Weeks 3-6)",
        [
            "## Deliverables",
            "W/M/Q report automation",
            "Research brief generator",
            "Content calendar sync",
            "AM dashboard",
            "",
            "## Success Metrics",
            "Report generation: 4 hrs → 15 mins",
            "Research time: 50% reduction",
            "Calendar adoption > 90%",
            "",
            "## Investment: $12,000 - $18,000",
        ],
    );

    deck.add_content_slide(
        "Phase 3: Intelligence Layer (Weeks 7-10)",
        [
            "## Deliverables",
            "Discord MCP server",
            "Notion MCP server",
            "Research Hub MCP",
            "Reply opportunity finder",
            "",
            "## Success Metrics",
            "AI-assisted responses in < 2 min",
            "Proactive client issue detection",
            "Social team efficiency +40%",
            "",
            "## Investment: $15,000 - $25,000",
        ],
    );

    // Value
    deck.add_content_slide(
        "ROI Projections - Conservative Estimates",
        [
            "## Weekly Time Savings → Annual Value (@$50/hr)",
            "",
            "Discord Digest: 10 hrs/week → $26,000/year",
            "Report Automation: 8 hrs/week → $20,800/year",
            "Research Briefs: 15 hrs/week → $39,000/year",
            "Brief Validation: 5 hrs/week → $13,000/year",
            "Calendar Sync: 3 hrs/week → $7,800/year",
            "",
            "## TOTAL: 41 hrs/week → $106,600/year",
            "",
            "## Payback Period: 3-4 months",
        ],
    );

    deck.add_content_slide(
        "The Real Value: Enabling Growth",
        [
            "## Without Automation",
            "$3M → $6M requires 40 → 80+ people",
            "Discord becomes unusable at scale",
            "Management overhead explodes",
            "",
            "## With Automation",
            "$3M → $6M with 40 → 60 people",
            "20 fewer hires needed",
            "At $60K avg salary = $1.2M annual savings",
            "",
            "## Total First-Year Value: $1.3M+",
        ],
    );

    deck.add_two_column_slide(
        "Risk Mitigation",
        [
            "## Team adoption",
            "Phased rollout, champions per dept",
            "",
            "## Tool fatigue",
            "Integrate into existing tools",
            "",
            "## AI accuracy",
            "Human-in-loop for critical decisions",
        ],
        [
            "## Data security",
            "Self-hosted n8n, no data leaves systems",
            "",
            "## Vendor lock-in",
            "Open-source stack, portable workflows",
            "",
            "## Complexity",
            "Start simple, iterate based on feedback",
        ],
    );

    // Engagement
    deck.add_content_slide(
        "Engagement Options",
        [
            "## Option A: Foundation Only",
            "Weeks 1-2 deliverables",
            "Discord digest + Notion forms",
            "Investment: $5,000 - $8,000",
            "",
            "## Option B: Core Package (Recommended)",
            "Phases 1 + 2",
            "Full report + research automation",
            "Investment: $17,000 - $26,000",
            "",
            "## Option C: Complete Transformation",
            "All 3 phases + MCP ecosystem",
            "Investment: $32,000 - $51,000",
        ],
    );

    deck.add_content_slide(
        "Next Steps",
        [
            "## Today",
            "Select engagement option",
            "",
            "## This Week",
            "Kick-off meeting, access provisioning",
            "",
            "## Week 1",
            "Foundation deployment begins",
            "",
            "## Week 2",
            "First results visible (Discord digest live)",
            "",
            "## Ongoing",
            "Bi-weekly progress reviews",
        ],
    );

    deck.add_title_slide(
        "Questions & Discussion",
        "Priority adjustments?\nSpecific integrations?\nTeam members for pilot?\nTimeline constraints?",
    );

    deck.add_title_slide(
        "Ready to Scale Impact3 Intelligently",
        "Reprise AI\nkeshav@reprisesai.com",
    );

    deck
}

#[cfg(test)]
mod tests {
    use deck_core::{SlideLayout, TextBoxRole};

    use super::*;

    #[test]
    fn test_deck_has_fixed_slide_count() {
        assert_eq!(build_deck().slide_count(), SLIDE_COUNT);
    }

    #[test]
    fn test_deck_order_is_stable() {
        let first: Vec<_> = build_deck()
            .slides()
            .iter()
            .map(|s| s.title().unwrap_or_default().to_string())
            .collect();
        let second: Vec<_> = build_deck()
            .slides()
            .iter()
            .map(|s| s.title().unwrap_or_default().to_string())
            .collect();
        assert_eq!(first, second);

        assert_eq!(first[0], "Impact3 AI & Automation Audit");
        assert_eq!(first[1], "Agenda");
        assert_eq!(first[5], "Pain Points Matrix");
        assert_eq!(first[8], "HIGH PRIORITY Pain Points");
        assert_eq!(first[23], "Risk Mitigation");
        assert_eq!(first[27], "Ready to Scale Impact3 Intelligently");
    }

    #[test]
    fn test_layout_sequence() {
        let deck = build_deck();
        let layouts: Vec<_> = deck.slides().iter().map(|s| s.layout).collect();

        let title_slides: Vec<usize> = layouts
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == SlideLayout::Title)
            .map(|(i, _)| i + 1)
            .collect();
        let two_column_slides: Vec<usize> = layouts
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == SlideLayout::TwoColumn)
            .map(|(i, _)| i + 1)
            .collect();

        assert_eq!(title_slides, vec![1, 6, 27, 28]);
        assert_eq!(two_column_slides, vec![9, 10, 24]);
    }

    #[test]
    fn test_every_slide_has_one_title() {
        for slide in build_deck().slides() {
            assert_eq!(slide.boxes_with_role(TextBoxRole::Title).len(), 1);
        }
    }

    #[test]
    fn test_executive_summary_body() {
        let deck = build_deck();
        let summary = &deck.slides()[2];
        let body = summary.boxes_with_role(TextBoxRole::Body)[0];

        assert_eq!(body.paragraphs.len(), 13);
        assert_eq!(body.paragraphs[0].text, "Goal");
        assert_eq!(body.paragraphs[2].text, "");
        assert_eq!(
            body.paragraphs[1].text,
            "• Scale from $3M to $6M ARR without doubling headcount (40 → 60 people)"
        );
    }
}
