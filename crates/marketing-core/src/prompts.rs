//! Prompt templates
//!
//! One builder per generation operation. Builders are deterministic: the
//! same input always yields the same prompt text. User inputs are embedded
//! verbatim.

use crate::imc::ImcBrief;
use crate::metrics::format_grouped;
use crate::schemas::MAX_DISCOVERED_KEYWORDS;

/// Keywords requested per fixed category in a broad fetch
pub const KEYWORDS_PER_CATEGORY: usize = 50;

/// Broad keyword research across the four fixed categories
pub fn broad_keywords() -> String {
    let n = KEYWORDS_PER_CATEGORY;
    format!(
        r#"Act as a digital marketing expert specializing in the Vietnamese market for Mcredit, a leading consumer finance company.
Generate comprehensive lists of Vietnamese search keywords related to consumer finance, focusing on these specific categories. The goal is to uncover a wide variety of keywords, including high-volume head terms and more specific, long-tail keywords, even those with lower volume and cheaper CPCs.

1. **Motorcycle Purchase Loans (Vay mua xe máy):** Generate {n} keywords. Include a mix of general terms, popular brand names (Honda, Yamaha, Suzuki, Piaggio), specific popular models (e.g., 'Honda Vision', 'Yamaha Exciter 155', 'Honda SH Mode'), and long-tail variations like 'trả góp xe Wave Alpha không cần trả trước' (installment for Wave Alpha with no down payment), 'vay mua xe máy cũ' (loan for used motorcycle).
2. **Phone Purchase Loans (Vay mua điện thoại):** Generate {n} keywords. Include general terms, and a wide range of specific models, including both new and older popular generations. For example: 'iPhone 15 Pro Max', 'iPhone 14 Pro', 'iPhone 13', 'iPhone 11', 'Samsung Galaxy S24 Ultra', 'Samsung S23', 'Samsung Z Fold 5', 'Oppo Reno11', 'Xiaomi 14'. Also include long-tail terms like 'thu cũ đổi mới iPhone 15' (trade-in for iPhone 15), 'trả góp điện thoại 0%' (0% installment for phone).
3. **Tablet Purchase Loans (Vay mua máy tính bảng):** Generate {n} keywords. Include general terms and a variety of specific models like 'iPad Pro M4', 'iPad Air 5', 'iPad Gen 10', 'Samsung Galaxy Tab S9', 'Xiaomi Pad 6'. Include long-tail variations like 'trả góp iPad cho sinh viên' (iPad installment for students).
4. **Cash Loans (Vay tiền mặt):** Generate {n} keywords. Include a broad mix of terms for personal loans, unsecured loans, quick cash advances, loans by ID card (vay theo CMND/CCCD), and long-tail keywords specifying purpose or amount, like 'vay 10 triệu online' (borrow 10 million online), 'vay tiền nhanh chỉ cần CMND' (quick loan with only ID card), 'vay tiêu dùng lãi suất thấp' (low-interest consumer loan).

This should result in a total of {total} keywords. For each keyword, provide:
- The keyword itself (in Vietnamese).
- Estimated search volume (High, Medium, or Low). Ensure a good mix, including plenty of 'Low' volume keywords to represent the long-tail.
- Likely user intent (e.g., informational, transactional, commercial investigation).
- An estimated Cost Per Click (CPC) range in VND, reflecting competitor spending. Include cheaper CPCs for less competitive long-tail keywords.
- The competition level (High, Medium, or Low). Ensure a good mix, including many 'Low' and 'Medium' competition keywords.
- A plausible SEMrush link for a keyword overview in the Vietnam database (db=vn), properly URL-encoded. For example, for "vay mua xe máy", the link would be something like "https://www.semrush.com/analytics/keywordoverview/?q=vay+mua+xe+may&db=vn".

The output must be a single JSON object with keys: "motorcycleLoanKeywords", "phoneLoanKeywords", "tabletLoanKeywords", and "cashLoanKeywords"."#,
        n = n,
        total = n * 4,
    )
}

/// Keyword discovery for an ad-hoc search term
pub fn discover_keywords(term: &str) -> String {
    format!(
        r#"Act as a digital marketing expert for Mcredit in Vietnam. The user wants to find keywords related to "{term}".
Generate a list of {count} relevant Vietnamese search keywords. The keywords should be a mix of informational, transactional, and commercial investigation queries.

For each keyword, provide:
- The keyword itself (in Vietnamese).
- Estimated search volume (High, Medium, or Low).
- Likely user intent.
- An estimated Cost Per Click (CPC) range in VND.
- The competition level (High, Medium, or Low).
- An example SEMrush link for a keyword overview in the Vietnam database (db=vn).

The output must be a single JSON array of keyword objects."#,
        term = term,
        count = MAX_DISCOVERED_KEYWORDS,
    )
}

/// Deep-dive analysis of one keyword
pub fn keyword_details(keyword: &str) -> String {
    format!(
        r#"Act as an SEO specialist for Mcredit in Vietnam. For the Vietnamese keyword "{keyword}", provide a detailed analysis. The output must be a single JSON object.

1. **User Intent Explanation:** In Vietnamese, elaborate on the user's specific goal, mindset, and what they expect to find.
2. **CPC Breakdown:** In Vietnamese, provide a more granular CPC estimate in Vietnamese Dong (VND). Include low and high range estimates and brief notes on bidding strategy or factors influencing the CPC.
3. **Related Keywords:** In Vietnamese, list 5 semantically related, long-tail keywords that target different facets of the user's need.
4. **Common Questions:** In Vietnamese, list 3 common questions users ask on Google related to this keyword."#,
        keyword = keyword,
    )
}

/// Content and SEO strategy for one keyword
pub fn content_strategy(keyword: &str) -> String {
    format!(
        r#"Act as a top-tier SEO consultant and content strategist for Mcredit, a consumer finance company in Vietnam.
Based on the Vietnamese keyword "{kw}", generate a comprehensive content and SEO strategy.
The output must be a single JSON object.

The strategy must include FOUR main parts:
1. **Keyword User Intent Analysis:**
   - Analyze the primary user intents behind the keyword "{kw}".
   - Identify at least 3 distinct intents (e.g., 'Informational', 'Transactional', 'Commercial Investigation').
   - For each intent, provide:
     - The `intent` type.
     - A detailed `description` of the user's goal for this intent, written in Vietnamese.
     - A list of 2-3 `exampleQueries` in Vietnamese that a user with this intent might search for.

2. **Content Pillar Deep Dive (Creative Strategy):**
   - Generate three comprehensive content pillar suggestions relevant to the keyword.
   - For each pillar, provide:
     - A compelling `pillarTitle`.
     - A `pillarDescription` that explains what the pillar covers AND how its cluster topics strategically work together to create a comprehensive content map, establishing topical authority.
     - A unique `contentAngle` or hook to make the content stand out from competitors.
     - Four related "cluster topics".
     - For each cluster topic, provide:
       - A catchy `clusterTitle`.
       - The primary `userIntent`, explaining what the user wants to accomplish with this search, written in Vietnamese (e.g., "So sánh các gói vay mua điện thoại để tìm ra lựa chọn tốt nhất" - "Compare phone loan packages to find the best option").
       - A short, appealing `clusterDescription` that directly addresses and expands on the user intent.
       - A `suggestedFormat` for the content (e.g., 'How-to Guide', 'Comparison Article', 'Video Script', 'Infographic').
       - 3-5 specific, long-tail `specificKeywords`.
       - A detailed and engaging `draftContent` (AT LEAST 500 characters long) written in appealing, persuasive Vietnamese. This draft should be a substantial piece of content, like a compelling introduction and first section of an article, not just a few sentences.

3. **Google AI Overview Roadmap:** A clear, step-by-step strategy to get content about "{kw}" featured in Google's AI Overviews.
   - `aiOverviewIntro`: An introduction that summarizes the three-step roadmap: building a strong content foundation, adding technical signals, and establishing trust.
   - `aiOverviewContent`: Step 1: Actionable tips on structuring the content itself to be easily digestible for AI. Focus on clarity, direct answers, and logical flow.
   - `aiOverviewSchema`: Step 2: Building on the content structure, provide specific Schema Markup recommendations to technically describe the content to Google.
   - `aiOverviewEEAT`: Step 3: To finalize the strategy, list concrete ways to enhance Experience, Expertise, Authoritativeness, and Trustworthiness (E-E-A-T) signals, proving the content's credibility.

4. **Competitor Landscape Analysis:**
   - Identify the top 3 ranking competitors for the specific keyword "{kw}" on Google.com.vn.
   - For each competitor, provide:
     - The `competitorName`.
     - A brief `strategySummary` of their content and approach specifically related to "{kw}". Do not give a general summary of their entire website. Focus only on the content that ranks for this keyword.
     - A list of their `strengths` in how they specifically target "{kw}" and its related user intent. For example, "They use a detailed cost calculator" or "Their article has testimonials".
     - A list of their `weaknesses` or content gaps Mcredit can exploit to outperform them for "{kw}". For example, "Their information is outdated" or "They lack a clear call-to-action".

All content must be in Vietnamese."#,
        kw = keyword,
    )
}

/// Rate estimation for a budget scenario
pub fn estimate_metrics(budget: f64, scenario: &str) -> String {
    format!(
        r#"Act as a senior digital marketing strategist for Mcredit, a consumer finance company in Vietnam.
A campaign is being planned with a monthly budget of {budget} VND.

The specific scenario for this campaign is: "{scenario}"

Based on this budget and scenario, provide a realistic and correlated estimation for the following key performance indicators (KPIs) for a Google Ads campaign in the Vietnamese consumer finance sector.

Your estimations must be nuanced and reflect the specifics of the scenario:
- If the scenario mentions a highly competitive niche (e.g., 'vay tiền nhanh'), the CPC should be higher.
- If the scenario focuses on a specific, long-tail product (e.g., 'trả góp iPad Pro cho sinh viên'), CPC might be lower but CTR could be higher due to relevance.
- If the goal is brand awareness, you might estimate a lower CVR compared to a conversion-focused campaign.
- If the scenario targets a high-value product (e.g., high-end motorcycle loan), the AOV should be higher.
- Correlate the metrics. For example, a higher budget for a broad target might increase CPC and lower CTR/CVR due to diminishing returns and less targeted audiences.

Provide your expert estimation for:
1. **Cost Per Click (CPC)** in VND.
2. **Click-Through Rate (CTR)** as a percentage.
3. **Conversion Rate (CVR)** as a percentage.
4. **Average Revenue / Conversion (AOV)** in VND, representing the average loan value.

The output must be a single JSON object with numeric values."#,
        budget = format_grouped(budget),
        scenario = scenario,
    )
}

/// The six-step IMC framework the planner must follow
pub const IMC_FRAMEWORK: &str = r#"An IMC plan is an integrated marketing communications plan. It helps brands build campaigns methodically and consistently across multiple channels. The goal is to unite all marketing activities into a single, memorable, and consistent story at every customer touchpoint.

The 6 steps to build an IMC plan are:
1. **Define Objectives**:
   * **Business Objective**: Focuses on business growth aspects like increasing sales/profit or market share.
   * **Marketing Objective**: Aims to change consumer behavior, focusing on factors like usage, frequency, or market penetration.
   * **Communication Objective**: Targets changes in user perception, considering brand awareness, media quality, and channel effectiveness.

2. **Define Target Audience**: Segment customers based on:
   * **Geographic**: Where they live (urban, rural, region).
   * **Demographic**: Age, gender, occupation, income, marital status.
   * **Psychographic**: Lifestyle, values, habits, interests.
   * **Behavioral**: Purchase frequency, online shopping habits, product preferences.

3. **Find Insight**: Uncover the unspoken needs or dilemmas of the customer. Use the "Truth – Tension – Motivation" model.
   * **Truth**: A simple, obvious fact about the consumer's life or the product category.
   * **Tension**: A conflict, frustration, or unresolved problem the consumer feels related to the truth.
   * **Motivation**: The consumer's underlying desire or goal that the brand can help them achieve.
   * The combination of these reveals the core **Insight**.

4. **Develop the Big Idea**: A central, unifying message that addresses the insight and guides the entire campaign.
   * It must be feasible and aligned with the brand's role.
   * It is supported by a clear **Key Message** that is communicated consistently.

5. **Create a Deployment Plan**: Detail the execution of the Big Idea across different phases.
   * Define phases (e.g., Pre-launch, Launch, Post-launch).
   * For each phase, specify duration, budget, objectives, a **Key Hook** (main activity), and **Supporting Tactics** (other channels/activities).

6. **Allocate Budget & Define KPIs**:
   * **KPIs**: Set measurable indicators to track success (e.g., Reach, Engagement, Brand Mentions, Conversions).
   * **Budget Allocation**: Use either a **Top-down** approach (allocating a pre-set total budget) or a **Bottom-up** approach (calculating costs for required activities and summing them up)."#;

/// IMC plan for a brief
pub fn imc_plan(brief: &ImcBrief) -> String {
    let budget = if brief.budget > 0.0 {
        format!("{} VND", format_grouped(brief.budget))
    } else {
        "Not specified".to_string()
    };

    format!(
        r#"Act as a world-class Integrated Marketing Communications (IMC) strategist from Tomorrow Marketers. Your task is to create a comprehensive IMC plan for a Vietnamese company based on the user's input.

You MUST strictly follow the 6-step framework and concepts detailed below.

--- FRAMEWORK KNOWLEDGE ---
{framework}
--- END OF FRAMEWORK KNOWLEDGE ---

Now, use this framework to generate a detailed and actionable IMC plan based on the following user input:

* **Product/Brand**: {product}
* **Business Problem/Goal**: {problem}
* **Target Audience Description**: {audience}
* **Total Campaign Budget**: {budget}
* **Budgeting Method**: {method}

Provide the output as a single, well-structured JSON object. The plan should be tailored for the Vietnamese market, with realistic and creative ideas. All qualitative content (like messages, ideas, descriptions) should be in Vietnamese, unless it's a technical term."#,
        framework = IMC_FRAMEWORK,
        product = brief.product,
        problem = brief.problem,
        audience = brief.audience,
        budget = budget,
        method = brief.budget_method,
    )
}
